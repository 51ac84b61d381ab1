use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::grades::requests::GradeExportParams;
use crate::services::GradeService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn compute_term_grades(
    req: HttpRequest,
    path: web::Path<(SafeCourseIdI64, String)>,
) -> ActixResult<HttpResponse> {
    let (course_id, term) = path.into_inner();
    GRADE_SERVICE
        .compute_term_grades(course_id.0, &term, &req)
        .await
}

pub async fn export_term_grades(
    req: HttpRequest,
    path: web::Path<(SafeCourseIdI64, String)>,
    query: web::Query<GradeExportParams>,
) -> ActixResult<HttpResponse> {
    let (course_id, term) = path.into_inner();
    GRADE_SERVICE
        .export_term_grades(course_id.0, &term, query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/terms/{term}/grades")
            .service(web::resource("").route(web::get().to(compute_term_grades)))
            .service(web::resource("/export").route(web::get().to(export_term_grades))),
    );
}
