use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use tracing::{error, info};

use super::TermService;
use crate::errors::GradebookError;
use crate::grading::{TermConfigError, validate_setups};
use crate::models::audit::entities::{AuditAction, NewAuditLog};
use crate::models::terms::requests::SaveTermSetupsRequest;
use crate::models::terms::responses::TermSetupListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit::record_audit;
use crate::services::require_course;
use crate::utils::extract_actor;

fn config_error_code(err: &TermConfigError) -> ErrorCode {
    match err {
        TermConfigError::WeightSum { .. }
        | TermConfigError::WeightOutOfRange { .. }
        | TermConfigError::DuplicateTerm(_) => {
            ErrorCode::TermWeightInvalid
        }
        TermConfigError::InvalidAssessment { .. } | TermConfigError::MultipleExams(_) => {
            ErrorCode::AssessmentInvalid
        }
    }
}

pub async fn save_term_setups(
    service: &TermService,
    course_id: i64,
    body: SaveTermSetupsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.terms.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "At least one term must be provided",
        )));
    }

    // 校验在事务开始前完成，不合法的批次不会触碰数据库
    if let Err(e) = validate_setups(&body.terms) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(config_error_code(&e), e.to_string())));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = require_course(&storage, course_id).await {
        return Ok(resp);
    }

    let terms: Vec<String> = body.terms.iter().map(|t| t.term.to_string()).collect();
    let assessment_count: usize = body.terms.iter().map(|t| t.assessments.len()).sum();

    match storage.save_term_setups(course_id, body.terms).await {
        Ok(items) => {
            info!("Saved term configuration {:?} for course {}", terms, course_id);
            record_audit(
                &storage,
                NewAuditLog {
                    action: AuditAction::TermConfigSave,
                    course_id: Some(course_id),
                    actor: extract_actor(request),
                    detail: json!({
                        "terms": terms,
                        "assessments": assessment_count,
                    }),
                },
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TermSetupListResponse { items },
                "Term configuration saved successfully",
            )))
        }
        Err(GradebookError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::AssessmentNotFound, msg))),
        // 已录入成绩超过新满分
        Err(GradebookError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssessmentInvalid, msg))),
        Err(e) => {
            error!("Failed to save term configuration for course {}: {}", course_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::TermSaveFailed,
                format!("Failed to save term configuration: {e}"),
            )))
        }
    }
}
