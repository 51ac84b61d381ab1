use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{
    audit::{
        entities::{AuditLog, NewAuditLog},
        requests::AuditLogParams,
        responses::AuditLogListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListParams, CreateCourseRequest},
        responses::CourseListResponse,
    },
    scores::entities::AssessmentScore,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams},
        responses::StudentListResponse,
    },
    terms::{
        entities::{Term, TermSetup},
        requests::TermSetupInput,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过学号获取学生
    async fn get_student_by_student_id(&self, student_id: &str) -> Result<Option<Student>>;
    // 通过 RFID 获取学生
    async fn get_student_by_rfid(&self, rfid: &str) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse>;

    /// 花名册方法
    // 课程已选学生
    async fn list_course_roster(&self, course_id: i64) -> Result<Vec<Student>>;
    // 课程已选学号集合
    async fn list_enrolled_student_ids(&self, course_id: i64) -> Result<HashSet<String>>;
    // 学生加入课程
    async fn enroll_student(&self, course_id: i64, student_id: &str) -> Result<()>;

    /// 学期配置方法
    // 课程全部学期配置
    async fn list_term_setups(&self, course_id: i64) -> Result<Vec<TermSetup>>;
    // 单个学期配置
    async fn get_term_setup(&self, course_id: i64, term: Term) -> Result<Option<TermSetup>>;
    // 在同一事务中保存多个学期配置
    async fn save_term_setups(
        &self,
        course_id: i64,
        setups: Vec<TermSetupInput>,
    ) -> Result<Vec<TermSetup>>;

    /// 成绩方法
    // 某课程某学期的全部成绩
    async fn list_scores(&self, course_id: i64, term: Term) -> Result<Vec<AssessmentScore>>;
    // 写入或清除单个成绩
    async fn upsert_score(
        &self,
        assessment_id: i64,
        student_id: &str,
        score: Option<f64>,
    ) -> Result<()>;

    /// 审计日志方法
    async fn record_audit(&self, entry: NewAuditLog) -> Result<AuditLog>;
    async fn list_audit_logs(&self, query: AuditLogParams) -> Result<AuditLogListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
