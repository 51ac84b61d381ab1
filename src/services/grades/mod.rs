pub mod compute;
pub mod export;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::grading::{compute_term_percentages, summarize_grades};
use crate::models::grades::requests::GradeExportParams;
use crate::models::grades::responses::TermGradeReport;
use crate::models::students::entities::Student;
use crate::models::terms::entities::Term;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{require_course, require_term_setup};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 计算学期成绩
    pub async fn compute_term_grades(
        &self,
        course_id: i64,
        term: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        compute::compute_term_grades(self, course_id, term, request).await
    }

    // 导出学期成绩表
    pub async fn export_term_grades(
        &self,
        course_id: i64,
        term: &str,
        params: GradeExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_term_grades(self, course_id, term, params, request).await
    }
}

/// 加载花名册、配置与成绩并计算整个课程的学期成绩
pub(crate) async fn load_term_report(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    term: Term,
) -> Result<(Vec<Student>, TermGradeReport), HttpResponse> {
    require_course(storage, course_id).await?;
    let setup = require_term_setup(storage, course_id, term).await?;

    let internal_error = |e: crate::errors::GradebookError| {
        tracing::error!("Failed to load grade data for course {}: {}", course_id, e);
        ApiResponse::from_error(ErrorCode::InternalServerError, &e)
    };
    let roster = storage
        .list_course_roster(course_id)
        .await
        .map_err(internal_error)?;
    let scores = storage
        .list_scores(course_id, term)
        .await
        .map_err(internal_error)?;

    let percentages = compute_term_percentages(
        &setup.config,
        &setup.assessments,
        &scores,
        roster.iter().map(|s| s.student_id.as_str()),
    );

    Ok((roster, summarize_grades(term, percentages)))
}
