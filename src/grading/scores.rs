//! 评估成绩存取与批量录入

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::Result;
use crate::models::roster::entities::ImportOutcome;
use crate::models::scores::entities::{AssessmentScore, ScoreEntryRow};
use crate::models::terms::entities::Assessment;

pub const MSG_SCORE_RECORDED: &str = "Score recorded";
pub const MSG_ASSESSMENT_NOT_FOUND: &str = "Assessment not found in this term";
pub const MSG_ASSESSMENT_DISABLED: &str = "Assessment is disabled";
pub const MSG_NOT_ENROLLED: &str = "Student is not enrolled in this course";

/// 按 (学生, 评估项) 索引的已录入成绩，未录入的成绩不会出现在这里
#[derive(Debug, Clone, Default)]
pub struct ScoreBook {
    by_student: HashMap<String, HashMap<i64, f64>>,
}

impl ScoreBook {
    pub fn from_scores<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = &'a AssessmentScore>,
    {
        let mut book = Self::default();
        for entry in scores {
            book.record(entry);
        }
        book
    }

    /// 写入一条成绩；同一 (学生, 评估项) 后写覆盖先写，空成绩表示清除
    pub fn record(&mut self, entry: &AssessmentScore) {
        let per_student = self.by_student.entry(entry.student_id.clone()).or_default();
        match entry.score {
            Some(score) => {
                per_student.insert(entry.assessment_id, score);
            }
            None => {
                per_student.remove(&entry.assessment_id);
            }
        }
    }

    pub fn get(&self, student_id: &str, assessment_id: i64) -> Option<f64> {
        self.by_student
            .get(student_id)
            .and_then(|scores| scores.get(&assessment_id))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_student.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 校验单个成绩是否落在 [0, max_score] 内
pub fn validate_score(assessment: &Assessment, score: f64) -> std::result::Result<(), String> {
    if !score.is_finite() || score < 0.0 || score > assessment.max_score {
        return Err(format!(
            "Score must be between 0 and {}",
            assessment.max_score
        ));
    }
    Ok(())
}

/// 成绩写入端口
#[async_trait]
pub trait ScoreWriter: Send + Sync {
    async fn write_score(
        &self,
        assessment_id: i64,
        student_id: &str,
        score: Option<f64>,
    ) -> Result<()>;
}

/// 逐行录入成绩，每行独立产生一个结果，单行失败不影响后续行
pub async fn reconcile_scores<W>(
    rows: &[ScoreEntryRow],
    assessments: &[Assessment],
    roster: &HashSet<String>,
    writer: &W,
) -> Vec<ImportOutcome>
where
    W: ScoreWriter + ?Sized,
{
    let by_id: HashMap<i64, &Assessment> = assessments.iter().map(|a| (a.id, a)).collect();
    let mut outcomes = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let outcome = reconcile_score_row(index + 1, row, &by_id, roster, writer).await;
        debug!(
            "Score row {} ({}): {} - {}",
            outcome.row, outcome.student_id, outcome.status, outcome.message
        );
        outcomes.push(outcome);
    }

    outcomes
}

async fn reconcile_score_row<W>(
    row_num: usize,
    row: &ScoreEntryRow,
    assessments: &HashMap<i64, &Assessment>,
    roster: &HashSet<String>,
    writer: &W,
) -> ImportOutcome
where
    W: ScoreWriter + ?Sized,
{
    let student_id = row.student_id.as_str();

    let mut missing = Vec::new();
    if student_id.trim().is_empty() {
        missing.push("studentId");
    }
    if row.assessment_id.is_none() {
        missing.push("assessmentId");
    }
    let Some(assessment_id) = row.assessment_id.filter(|_| missing.is_empty()) else {
        return ImportOutcome::error(
            row_num,
            student_id,
            format!("Missing required fields: {}", missing.join(", ")),
        );
    };

    let Some(assessment) = assessments.get(&assessment_id) else {
        return ImportOutcome::error(row_num, student_id, MSG_ASSESSMENT_NOT_FOUND);
    };
    if !assessment.enabled {
        return ImportOutcome::skipped(row_num, student_id, MSG_ASSESSMENT_DISABLED);
    }
    if !roster.contains(student_id) {
        return ImportOutcome::skipped(row_num, student_id, MSG_NOT_ENROLLED);
    }
    if let Some(score) = row.score
        && let Err(msg) = validate_score(assessment, score)
    {
        return ImportOutcome::error(row_num, student_id, msg);
    }

    match writer.write_score(assessment_id, student_id, row.score).await {
        Ok(()) => ImportOutcome::imported(row_num, student_id, MSG_SCORE_RECORDED),
        Err(e) => ImportOutcome::error(row_num, student_id, e.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GradebookError;
    use crate::models::roster::entities::ImportStatus;
    use crate::models::terms::entities::{AssessmentCategory, Term};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryWriter {
        written: Mutex<Vec<(i64, String, Option<f64>)>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl ScoreWriter for MemoryWriter {
        async fn write_score(
            &self,
            assessment_id: i64,
            student_id: &str,
            score: Option<f64>,
        ) -> Result<()> {
            if self.fail_for.as_deref() == Some(student_id) {
                return Err(GradebookError::database_operation("write failed"));
            }
            self.written
                .lock()
                .unwrap()
                .push((assessment_id, student_id.to_string(), score));
            Ok(())
        }
    }

    fn assessment(id: i64, max_score: f64, enabled: bool) -> Assessment {
        Assessment {
            id,
            term: Term::Prelim,
            category: AssessmentCategory::Quiz,
            title: format!("Quiz {id}"),
            max_score,
            enabled,
            order: id as i32,
        }
    }

    fn row(student_id: &str, assessment_id: Option<i64>, score: Option<f64>) -> ScoreEntryRow {
        ScoreEntryRow {
            student_id: student_id.to_string(),
            assessment_id,
            score,
        }
    }

    fn roster(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_book_lookup_and_clear() {
        let mut book = ScoreBook::from_scores(&[
            AssessmentScore::new("S1", 1, Some(8.0)),
            AssessmentScore::new("S1", 2, None),
            AssessmentScore::new("S2", 1, Some(5.0)),
        ]);
        assert_eq!(book.get("S1", 1), Some(8.0));
        assert_eq!(book.get("S1", 2), None);
        assert_eq!(book.get("S3", 1), None);
        assert_eq!(book.len(), 2);

        book.record(&AssessmentScore::new("S1", 1, None));
        assert_eq!(book.get("S1", 1), None);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_validate_score_bounds() {
        let quiz = assessment(1, 20.0, true);
        assert!(validate_score(&quiz, 0.0).is_ok());
        assert!(validate_score(&quiz, 20.0).is_ok());
        assert!(validate_score(&quiz, 20.5).is_err());
        assert!(validate_score(&quiz, -1.0).is_err());
        assert!(validate_score(&quiz, f64::NAN).is_err());
    }

    #[tokio::test]
    async fn test_reconcile_scores_outcomes() {
        let assessments = [assessment(1, 20.0, true), assessment(2, 10.0, false)];
        let rows = [
            row("S1", Some(1), Some(18.0)),
            row("S1", Some(1), Some(25.0)),
            row("S1", Some(2), Some(5.0)),
            row("S9", Some(1), Some(5.0)),
            row("S1", Some(99), Some(5.0)),
            row("", None, Some(5.0)),
            row("S2", Some(1), None),
        ];
        let writer = MemoryWriter::default();
        let outcomes =
            reconcile_scores(&rows, &assessments, &roster(&["S1", "S2"]), &writer).await;

        let statuses: Vec<ImportStatus> = outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                ImportStatus::Imported,
                ImportStatus::Error,
                ImportStatus::Skipped,
                ImportStatus::Skipped,
                ImportStatus::Error,
                ImportStatus::Error,
                ImportStatus::Imported,
            ]
        );
        assert_eq!(outcomes[1].message, "Score must be between 0 and 20");
        assert_eq!(outcomes[2].message, MSG_ASSESSMENT_DISABLED);
        assert_eq!(outcomes[3].message, MSG_NOT_ENROLLED);
        assert_eq!(outcomes[4].message, MSG_ASSESSMENT_NOT_FOUND);
        assert_eq!(
            outcomes[5].message,
            "Missing required fields: studentId, assessmentId"
        );

        let written = writer.written.lock().unwrap();
        assert_eq!(
            *written,
            vec![(1, "S1".to_string(), Some(18.0)), (1, "S2".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn test_write_failure_is_row_isolated() {
        let assessments = [assessment(1, 20.0, true)];
        let rows = [row("S1", Some(1), Some(10.0)), row("S2", Some(1), Some(12.0))];
        let writer = MemoryWriter {
            fail_for: Some("S1".to_string()),
            ..Default::default()
        };
        let outcomes =
            reconcile_scores(&rows, &assessments, &roster(&["S1", "S2"]), &writer).await;

        assert_eq!(outcomes[0].status, ImportStatus::Error);
        assert_eq!(outcomes[0].message, "write failed");
        assert_eq!(outcomes[1].status, ImportStatus::Imported);
        assert_eq!(outcomes[1].row, 2);
    }
}
