use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::roster::requests::RosterTemplateParams;
use crate::services::RosterService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 ROSTER_SERVICE 实例
static ROSTER_SERVICE: Lazy<RosterService> = Lazy::new(RosterService::new_lazy);

// HTTP处理程序
pub async fn list_roster(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.list_roster(course_id.0, &req).await
}

pub async fn import_roster(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE
        .import_roster(course_id.0, payload, &req)
        .await
}

// 模板与课程无关，路径中的课程 ID 仅做格式校验
pub async fn download_template(
    _course_id: SafeCourseIdI64,
    query: web::Query<RosterTemplateParams>,
) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.download_template(&query.format).await
}

// 配置路由
pub fn configure_roster_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/roster")
            .service(web::resource("").route(web::get().to(list_roster)))
            .service(web::resource("/import").route(web::post().to(import_roster)))
            .service(web::resource("/template").route(web::get().to(download_template))),
    );
}
