use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TermService;
use crate::models::terms::responses::TermSetupListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_course;

pub async fn list_term_setups(
    service: &TermService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_course(&storage, course_id).await {
        return Ok(resp);
    }

    match storage.list_term_setups(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TermSetupListResponse { items },
            "Term configuration retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve term configuration: {e}"),
            )),
        ),
    }
}
