use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::terms::requests::SaveTermSetupsRequest;
use crate::services::TermService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 TERM_SERVICE 实例
static TERM_SERVICE: Lazy<TermService> = Lazy::new(TermService::new_lazy);

// HTTP处理程序
pub async fn list_term_setups(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    TERM_SERVICE.list_term_setups(course_id.0, &req).await
}

pub async fn save_term_setups(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    body: web::Json<SaveTermSetupsRequest>,
) -> ActixResult<HttpResponse> {
    TERM_SERVICE
        .save_term_setups(course_id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_terms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/courses/{course_id}/terms")
            .route(web::get().to(list_term_setups))
            // 整批保存，任一学期不合法则全部拒绝
            .route(web::put().to(save_term_setups)),
    );
}
