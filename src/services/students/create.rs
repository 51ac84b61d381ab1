use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::utils::validate::{
    validate_middle_initial, validate_person_name, validate_rfid, validate_student_id,
};

/// 去掉首尾空白，空字符串视为未填写
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn create_student(
    service: &StudentService,
    mut student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    student_data.student_id = student_data.student_id.trim().to_string();
    student_data.first_name = student_data.first_name.trim().to_string();
    student_data.last_name = student_data.last_name.trim().to_string();
    student_data.middle_initial = normalize_optional(student_data.middle_initial);
    student_data.rfid = normalize_optional(student_data.rfid);

    // 验证学号
    if let Err(msg) = validate_student_id(&student_data.student_id) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StudentIdInvalid, msg)));
    }

    // 验证姓名
    for name in [&student_data.first_name, &student_data.last_name] {
        if let Err(msg) = validate_person_name(name) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentNameInvalid, msg)));
        }
    }
    if let Some(ref mi) = student_data.middle_initial
        && let Err(msg) = validate_middle_initial(mi)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StudentNameInvalid, msg)));
    }

    // 验证 RFID
    if let Some(ref rfid) = student_data.rfid
        && let Err(msg) = validate_rfid(rfid)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);

    // 学号与 RFID 唯一性检查
    match storage
        .get_student_by_student_id(&student_data.student_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "Student ID already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check student id: {}", e);
            return Ok(ApiResponse::from_error(ErrorCode::InternalServerError, &e));
        }
    }

    if let Some(ref rfid) = student_data.rfid {
        match storage.get_student_by_rfid(rfid).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::StudentAlreadyExists,
                    "RFID is already registered to another student",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check rfid: {}", e);
                return Ok(ApiResponse::from_error(ErrorCode::InternalServerError, &e));
            }
        }
    }

    match storage.create_student(student_data).await {
        Ok(student) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(student, "Student created successfully"))),
        Err(e) => {
            let msg = format!("Student creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::StudentCreationFailed, msg)))
        }
    }
}
