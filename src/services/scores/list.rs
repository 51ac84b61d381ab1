use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoreService;
use crate::models::scores::responses::ScoreListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{parse_term, require_course};

pub async fn list_scores(
    service: &ScoreService,
    course_id: i64,
    term: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let term = match parse_term(term) {
        Ok(term) => term,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    if let Err(resp) = require_course(&storage, course_id).await {
        return Ok(resp);
    }

    match storage.list_scores(course_id, term).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScoreListResponse {
                course_id,
                term,
                items,
            },
            "Scores retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve scores: {e}"),
            )),
        ),
    }
}
