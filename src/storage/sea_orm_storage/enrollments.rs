//! 花名册（选课）存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::course_enrollments::{
    ActiveModel, Column as EnrollmentColumn, Entity as CourseEnrollments,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{GradebookError, Result};
use crate::models::students::entities::Student;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 列出课程花名册
    pub async fn list_course_roster_impl(&self, course_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::students::Relation::CourseEnrollments.def(),
            )
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .order_by_asc(StudentColumn::LastName)
            .order_by_asc(StudentColumn::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询课程花名册失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 课程已选学号集合
    pub async fn list_enrolled_student_ids_impl(&self, course_id: i64) -> Result<HashSet<String>> {
        let enrollments = CourseEnrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(enrollments.into_iter().map(|m| m.student_id).collect())
    }

    /// 学生加入课程
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id.to_string()),
            enrolled_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("加入课程失败: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::students::requests::CreateStudentRequest;

    fn student(id: &str, last: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            student_id: id.to_string(),
            first_name: "Jo".to_string(),
            last_name: last.to_string(),
            middle_initial: None,
            rfid: Some(format!("RF-{id}")),
        }
    }

    #[tokio::test]
    async fn test_roster_round_trip() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let course = storage
            .create_course_impl(CreateCourseRequest {
                code: "MATH101".to_string(),
                name: "Algebra".to_string(),
                description: None,
            })
            .await
            .unwrap();
        storage.create_student_impl(student("S1", "Zed")).await.unwrap();
        storage.create_student_impl(student("S2", "Abe")).await.unwrap();
        storage.create_student_impl(student("S3", "Mid")).await.unwrap();

        storage.enroll_student_impl(course.id, "S1").await.unwrap();
        storage.enroll_student_impl(course.id, "S2").await.unwrap();

        let ids = storage.list_enrolled_student_ids_impl(course.id).await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("S1") && ids.contains("S2"));

        let roster = storage.list_course_roster_impl(course.id).await.unwrap();
        let names: Vec<&str> = roster.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Zed"]);
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_rejected() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let course = storage
            .create_course_impl(CreateCourseRequest {
                code: "SCI".to_string(),
                name: "Science".to_string(),
                description: None,
            })
            .await
            .unwrap();
        storage.create_student_impl(student("S1", "Lee")).await.unwrap();

        storage.enroll_student_impl(course.id, "S1").await.unwrap();
        assert!(storage.enroll_student_impl(course.id, "S1").await.is_err());
    }
}
