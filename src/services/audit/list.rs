use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuditService;
use crate::models::{ApiResponse, ErrorCode, audit::requests::AuditLogParams};

pub async fn list_audit_logs(
    service: &AuditService,
    query: AuditLogParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_audit_logs(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Audit logs retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve audit logs: {e}"),
            )),
        ),
    }
}
