pub mod audit;
pub mod courses;
pub mod grades;
pub mod roster;
pub mod scores;
pub mod students;
pub mod terms;

pub use audit::AuditService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use roster::RosterService;
pub use scores::ScoreService;
pub use students::StudentService;
pub use terms::TermService;

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::models::courses::entities::Course;
use crate::models::terms::entities::{Term, TermSetup};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 读取课程，不存在时返回可直接作为响应的 404
pub(crate) async fn require_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Err(ApiResponse::from_error(ErrorCode::InternalServerError, &e)),
    }
}

/// 解析路径中的学期，不合法时返回 400
pub(crate) fn parse_term(raw: &str) -> Result<Term, HttpResponse> {
    raw.parse::<Term>().map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::TermInvalid, msg))
    })
}

/// 读取学期配置，未配置权重时返回 404
pub(crate) async fn require_term_setup(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    term: Term,
) -> Result<TermSetup, HttpResponse> {
    match storage.get_term_setup(course_id, term).await {
        Ok(Some(setup)) => Ok(setup),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TermNotConfigured,
            format!("{term} has not been configured for this course"),
        ))),
        Err(e) => Err(ApiResponse::from_error(ErrorCode::InternalServerError, &e)),
    }
}
