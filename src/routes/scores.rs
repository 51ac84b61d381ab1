use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::scores::requests::RecordScoresRequest;
use crate::services::ScoreService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 SCORE_SERVICE 实例
static SCORE_SERVICE: Lazy<ScoreService> = Lazy::new(ScoreService::new_lazy);

// HTTP处理程序
pub async fn list_scores(
    req: HttpRequest,
    path: web::Path<(SafeCourseIdI64, String)>,
) -> ActixResult<HttpResponse> {
    let (course_id, term) = path.into_inner();
    SCORE_SERVICE.list_scores(course_id.0, &term, &req).await
}

pub async fn record_scores(
    req: HttpRequest,
    path: web::Path<(SafeCourseIdI64, String)>,
    body: web::Json<RecordScoresRequest>,
) -> ActixResult<HttpResponse> {
    let (course_id, term) = path.into_inner();
    SCORE_SERVICE
        .record_scores(course_id.0, &term, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_scores_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/courses/{course_id}/terms/{term}/scores")
            .route(web::get().to(list_scores))
            .route(web::put().to(record_scores)),
    );
}
