use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RosterService;
use crate::models::roster::responses::RosterResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_course;

pub async fn list_roster(
    service: &RosterService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_course(&storage, course_id).await {
        return Ok(resp);
    }

    match storage.list_course_roster(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RosterResponse { course_id, items },
            "Roster retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve roster: {e}"),
            )),
        ),
    }
}
