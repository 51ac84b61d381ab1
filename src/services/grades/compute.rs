use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, load_term_report};
use crate::models::ApiResponse;
use crate::services::parse_term;

pub async fn compute_term_grades(
    service: &GradeService,
    course_id: i64,
    term: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let term = match parse_term(term) {
        Ok(term) => term,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    match load_term_report(&storage, course_id, term).await {
        Ok((_, report)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Term grades computed successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
