//! 花名册导入对账
//!
//! 行按输入顺序依次处理：已导入的学号会加入花名册集合，
//! 因此同一批次里重复出现的学号只有第一次会被导入。

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::Result;
use crate::models::roster::entities::{ImportOutcome, RosterImportRow};
use crate::models::students::entities::Student;

pub const MSG_IMPORTED: &str = "Successfully added to course";
pub const MSG_ALREADY_ENROLLED: &str = "Already enrolled in this course";
pub const MSG_STUDENT_NOT_FOUND: &str = "Student not found in database";
pub const MSG_NO_RFID: &str = "Student does not have RFID registration";

/// 对账时依赖的学生查询与选课写入
#[async_trait]
pub trait RosterGateway: Send + Sync {
    async fn find_student(&self, student_id: &str) -> Result<Option<Student>>;
    async fn enroll_student(&self, student: &Student) -> Result<()>;
}

/// 列出行中为空的必填字段
fn missing_fields(row: &RosterImportRow) -> Vec<&'static str> {
    [
        ("studentId", &row.student_id),
        ("firstName", &row.first_name),
        ("lastName", &row.last_name),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect()
}

/// 将一批花名册行合并进课程，返回与输入一一对应的结果
///
/// `roster` 为当前已选课学号集合，成功导入的学号会被加入其中。
pub async fn reconcile<G>(
    rows: &[RosterImportRow],
    roster: &mut HashSet<String>,
    gateway: &G,
) -> Vec<ImportOutcome>
where
    G: RosterGateway + ?Sized,
{
    let mut outcomes = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let outcome = reconcile_row(index + 1, row, roster, gateway)
            .await
            .with_line(row.line);
        debug!(
            "Roster row {} (line {:?}, {}): {} - {}",
            outcome.row, outcome.line, outcome.student_id, outcome.status, outcome.message
        );
        outcomes.push(outcome);
    }

    outcomes
}

async fn reconcile_row<G>(
    row_num: usize,
    row: &RosterImportRow,
    roster: &mut HashSet<String>,
    gateway: &G,
) -> ImportOutcome
where
    G: RosterGateway + ?Sized,
{
    let student_id = row.student_id.as_str();

    let missing = missing_fields(row);
    if !missing.is_empty() {
        return ImportOutcome::error(
            row_num,
            student_id,
            format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    if roster.contains(student_id) {
        return ImportOutcome::skipped(row_num, student_id, MSG_ALREADY_ENROLLED);
    }

    let student = match gateway.find_student(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return ImportOutcome::skipped(row_num, student_id, MSG_STUDENT_NOT_FOUND),
        Err(e) => return ImportOutcome::error(row_num, student_id, e.message()),
    };

    if !student.has_rfid() {
        return ImportOutcome::skipped(row_num, student_id, MSG_NO_RFID);
    }

    match gateway.enroll_student(&student).await {
        Ok(()) => {
            roster.insert(student_id.to_string());
            ImportOutcome::imported(row_num, student_id, MSG_IMPORTED)
        }
        Err(e) => ImportOutcome::error(row_num, student_id, e.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GradebookError;
    use crate::models::roster::entities::ImportStatus;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryGateway {
        students: HashMap<String, Student>,
        enrolled: Mutex<Vec<String>>,
        lookup_fails_for: Option<String>,
        enroll_fails_for: Option<String>,
    }

    impl MemoryGateway {
        fn with_students(students: &[(&str, Option<&str>)]) -> Self {
            let students = students
                .iter()
                .enumerate()
                .map(|(i, (id, rfid))| {
                    (
                        id.to_string(),
                        Student {
                            id: i as i64 + 1,
                            student_id: id.to_string(),
                            first_name: "Jo".to_string(),
                            last_name: "Lee".to_string(),
                            middle_initial: None,
                            rfid: rfid.map(str::to_string),
                            created_at: DateTime::<Utc>::default(),
                            updated_at: DateTime::<Utc>::default(),
                        },
                    )
                })
                .collect();
            Self {
                students,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl RosterGateway for MemoryGateway {
        async fn find_student(&self, student_id: &str) -> Result<Option<Student>> {
            if self.lookup_fails_for.as_deref() == Some(student_id) {
                return Err(GradebookError::database_connection("connection reset"));
            }
            Ok(self.students.get(student_id).cloned())
        }

        async fn enroll_student(&self, student: &Student) -> Result<()> {
            if self.enroll_fails_for.as_deref() == Some(student.student_id.as_str()) {
                return Err(GradebookError::database_operation("insert rejected"));
            }
            self.enrolled.lock().unwrap().push(student.student_id.clone());
            Ok(())
        }
    }

    fn row(id: &str) -> RosterImportRow {
        RosterImportRow::new(id, "Jo", "Lee")
    }

    #[tokio::test]
    async fn test_duplicate_in_batch_second_is_skipped() {
        let gateway = MemoryGateway::with_students(&[("S1", Some("RF-1"))]);
        let mut roster = HashSet::new();

        let outcomes = reconcile(&[row("S1"), row("S1")], &mut roster, &gateway).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].status, ImportStatus::Imported);
        assert_eq!(outcomes[0].message, MSG_IMPORTED);
        assert_eq!(outcomes[1].status, ImportStatus::Skipped);
        assert_eq!(outcomes[1].message, MSG_ALREADY_ENROLLED);
        assert!(roster.contains("S1"));
        assert_eq!(*gateway.enrolled.lock().unwrap(), vec!["S1".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_batch_yields_no_outcomes() {
        let gateway = MemoryGateway::default();
        let mut roster = HashSet::new();
        assert!(reconcile(&[], &mut roster, &gateway).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_listed() {
        let gateway = MemoryGateway::default();
        let mut roster = HashSet::new();
        let rows = [RosterImportRow::new("S1", "  ", ""), RosterImportRow::new("", "Jo", "Lee")];

        let outcomes = reconcile(&rows, &mut roster, &gateway).await;

        assert_eq!(outcomes[0].status, ImportStatus::Error);
        assert_eq!(outcomes[0].message, "Missing required fields: firstName, lastName");
        assert_eq!(outcomes[1].message, "Missing required fields: studentId");
    }

    #[tokio::test]
    async fn test_each_skip_reason() {
        let gateway = MemoryGateway::with_students(&[("S2", None), ("S3", Some("RF-3"))]);
        let mut roster: HashSet<String> = ["S3".to_string()].into_iter().collect();
        let rows = [row("S1"), row("S2"), row("S3")];

        let outcomes = reconcile(&rows, &mut roster, &gateway).await;

        let messages: Vec<&str> = outcomes.iter().map(|o| o.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![MSG_STUDENT_NOT_FOUND, MSG_NO_RFID, MSG_ALREADY_ENROLLED]
        );
        assert!(outcomes.iter().all(|o| o.status == ImportStatus::Skipped));
        assert!(gateway.enrolled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let mut gateway = MemoryGateway::with_students(&[
            ("S1", Some("RF-1")),
            ("S2", Some("RF-2")),
            ("S3", Some("RF-3")),
        ]);
        gateway.lookup_fails_for = Some("S1".to_string());
        gateway.enroll_fails_for = Some("S2".to_string());
        let mut roster = HashSet::new();

        let outcomes = reconcile(&[row("S1"), row("S2"), row("S3")], &mut roster, &gateway).await;

        assert_eq!(outcomes[0].status, ImportStatus::Error);
        assert_eq!(outcomes[0].message, "connection reset");
        assert_eq!(outcomes[1].status, ImportStatus::Error);
        assert_eq!(outcomes[1].message, "insert rejected");
        assert_eq!(outcomes[2].status, ImportStatus::Imported);
        assert_eq!(roster.len(), 1);
        assert!(!roster.contains("S2"));
    }

    #[tokio::test]
    async fn test_outcomes_preserve_order_and_row_numbers() {
        let gateway = MemoryGateway::with_students(&[("A", Some("1")), ("B", Some("2"))]);
        let mut roster = HashSet::new();
        let rows = [row("B"), row(""), row("A")];

        let outcomes = reconcile(&rows, &mut roster, &gateway).await;

        let ids: Vec<(usize, &str)> = outcomes
            .iter()
            .map(|o| (o.row, o.student_id.as_str()))
            .collect();
        assert_eq!(ids, vec![(1, "B"), (2, ""), (3, "A")]);
    }

    #[tokio::test]
    async fn test_outcomes_carry_source_line_numbers() {
        let gateway = MemoryGateway::with_students(&[("A", Some("1"))]);
        let mut roster = HashSet::new();
        // 源文件第 3 行为空行，已在解析时被跳过
        let rows = [row("A").at_line(2), row("Z").at_line(4)];

        let outcomes = reconcile(&rows, &mut roster, &gateway).await;

        let positions: Vec<(usize, Option<usize>)> =
            outcomes.iter().map(|o| (o.row, o.line)).collect();
        assert_eq!(positions, vec![(1, Some(2)), (2, Some(4))]);
        assert_eq!(outcomes[1].status, ImportStatus::Skipped);
    }
}
