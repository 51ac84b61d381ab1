use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use tracing::{error, info};

use super::ScoreService;
use super::writer::StorageScoreWriter;
use crate::config::AppConfig;
use crate::grading::{reconcile_scores, summarize};
use crate::models::audit::entities::{AuditAction, NewAuditLog};
use crate::models::scores::requests::RecordScoresRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit::record_audit;
use crate::services::{parse_term, require_course, require_term_setup};
use crate::utils::extract_actor;

pub async fn record_scores(
    service: &ScoreService,
    course_id: i64,
    term: &str,
    body: RecordScoresRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let term = match parse_term(term) {
        Ok(term) => term,
        Err(resp) => return Ok(resp),
    };

    let max_rows = AppConfig::get().import.max_rows;
    if body.rows.len() > max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("A single batch supports at most {max_rows} rows"),
        )));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = require_course(&storage, course_id).await {
        return Ok(resp);
    }

    let setup = match require_term_setup(&storage, course_id, term).await {
        Ok(setup) => setup,
        Err(resp) => return Ok(resp),
    };

    let roster = match storage.list_enrolled_student_ids(course_id).await {
        Ok(ids) => ids,
        Err(e) => {
            error!("Failed to load roster for course {}: {}", course_id, e);
            return Ok(ApiResponse::from_error(ErrorCode::InternalServerError, &e));
        }
    };

    let writer = StorageScoreWriter::new(storage.clone());
    let outcomes = reconcile_scores(&body.rows, &setup.assessments, &roster, &writer).await;
    let summary = summarize(outcomes);

    info!(
        "Score entry for course {} {} finished: {} recorded, {} skipped, {} errors",
        course_id,
        term,
        summary.imported,
        summary.skipped,
        summary.errors.len()
    );

    record_audit(
        &storage,
        NewAuditLog {
            action: AuditAction::ScoreEntry,
            course_id: Some(course_id),
            actor: extract_actor(request),
            detail: json!({
                "term": term,
                "total": summary.total,
                "recorded": summary.imported,
                "skipped": summary.skipped,
                "errors": summary.errors.len(),
            }),
        },
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Score entry completed")))
}
