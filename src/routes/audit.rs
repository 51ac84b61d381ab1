use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::audit::requests::AuditLogParams;
use crate::services::AuditService;

// 懒加载的全局 AUDIT_SERVICE 实例
static AUDIT_SERVICE: Lazy<AuditService> = Lazy::new(AuditService::new_lazy);

pub async fn list_audit_logs(
    req: HttpRequest,
    query: web::Query<AuditLogParams>,
) -> ActixResult<HttpResponse> {
    AUDIT_SERVICE
        .list_audit_logs(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_audit_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/audit-logs").route(web::get().to(list_audit_logs)));
}
