use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::utils::validate::validate_course_code;

pub async fn create_course(
    service: &CourseService,
    mut course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    course_data.code = course_data.code.trim().to_uppercase();
    course_data.name = course_data.name.trim().to_string();
    course_data.description = course_data
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    if let Err(msg) = validate_course_code(&course_data.code) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    if course_data.name.is_empty() || course_data.name.chars().count() > 200 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course name must be between 1 and 200 characters",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_code(&course_data.code).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                "Course code already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check course code: {}", e);
            return Ok(ApiResponse::from_error(ErrorCode::InternalServerError, &e));
        }
    }

    match storage.create_course(course_data).await {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => {
            let msg = format!("Course creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::CourseCreationFailed, msg)))
        }
    }
}
