use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::GradebookError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 将存储层错误转换为 HTTP 响应，状态码由错误类型决定
    pub fn from_error(code: ErrorCode, err: &GradebookError) -> HttpResponse {
        let body = Self::error_empty(code, err.message());
        match err {
            GradebookError::NotFound(_) => HttpResponse::NotFound().json(body),
            GradebookError::Validation(_) | GradebookError::ImportParse(_) => {
                HttpResponse::BadRequest().json(body)
            }
            GradebookError::Conflict(_) => HttpResponse::Conflict().json(body),
            _ => HttpResponse::InternalServerError().json(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_success_carries_zero_code() {
        let resp = ApiResponse::success(5_i32, "ok");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data, Some(5));
    }

    #[test]
    fn test_from_error_status_mapping() {
        let cases = [
            (GradebookError::not_found("x"), StatusCode::NOT_FOUND),
            (GradebookError::validation("x"), StatusCode::BAD_REQUEST),
            (GradebookError::conflict("x"), StatusCode::CONFLICT),
            (
                GradebookError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp = ApiResponse::from_error(ErrorCode::BadRequest, &err);
            assert_eq!(resp.status(), status);
        }
    }
}
