//! 花名册导入服务

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use serde_json::json;
use tracing::{error, info};

use super::RosterService;
use super::gateway::StorageRosterGateway;
use super::parse::{parse_csv, parse_workbook};
use crate::config::AppConfig;
use crate::grading::{reconcile, summarize};
use crate::models::audit::entities::{AuditAction, NewAuditLog};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit::record_audit;
use crate::services::require_course;
use crate::utils::{extract_actor, validate_magic_bytes};

/// 上传读取错误
enum UploadError {
    Read(String),
    TooLarge(usize),
    MissingFile,
}

impl UploadError {
    fn into_response(self) -> HttpResponse {
        match self {
            Self::Read(msg) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Failed to read upload: {msg}"),
            )),
            Self::TooLarge(limit) => HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::FileSizeExceeded,
                format!("File exceeds the maximum size of {limit} bytes"),
            )),
            Self::MissingFile => HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "No file field found in upload",
            )),
        }
    }
}

/// 导入花名册
pub async fn import_roster(
    service: &RosterService,
    course_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    if let Err(resp) = require_course(&storage, course_id).await {
        return Ok(resp);
    }

    // 读取文件内容
    let (file_bytes, file_name) =
        match read_file_from_multipart(&mut payload, config.import.max_file_size).await {
            Ok(result) => result,
            Err(e) => return Ok(e.into_response()),
        };

    let extension = file_name
        .rfind('.')
        .map(|i| file_name[i..].to_lowercase())
        .unwrap_or_default();

    if !validate_magic_bytes(&file_bytes, &extension) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "Only .csv, .xlsx and .xls files are supported",
        )));
    }

    // 根据文件扩展名解析
    let parsed = match extension.as_str() {
        ".xlsx" | ".xls" => parse_workbook(&file_bytes),
        _ => parse_csv(&file_bytes),
    };
    let rows = match parsed {
        Ok(rows) => rows,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "The file contains no data rows",
        )));
    }

    if rows.len() > config.import.max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!(
                "A single import supports at most {} rows",
                config.import.max_rows
            ),
        )));
    }

    let mut roster = match storage.list_enrolled_student_ids(course_id).await {
        Ok(ids) => ids,
        Err(e) => {
            error!("Failed to load roster for course {}: {}", course_id, e);
            return Ok(ApiResponse::from_error(ErrorCode::InternalServerError, &e));
        }
    };

    let gateway = StorageRosterGateway::new(storage.clone(), course_id);
    let outcomes = reconcile(&rows, &mut roster, &gateway).await;
    let summary = summarize(outcomes);

    info!(
        "Roster import for course {} finished: {} imported, {} skipped, {} errors",
        course_id,
        summary.imported,
        summary.skipped,
        summary.errors.len()
    );

    record_audit(
        &storage,
        NewAuditLog {
            action: AuditAction::RosterImport,
            course_id: Some(course_id),
            actor: extract_actor(request),
            detail: json!({
                "file_name": file_name,
                "total": summary.total,
                "imported": summary.imported,
                "skipped": summary.skipped,
                "errors": summary.errors.len(),
            }),
        },
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Roster import completed")))
}

async fn read_file_from_multipart(
    payload: &mut Multipart,
    max_size: usize,
) -> Result<(Vec<u8>, String), UploadError> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Read(e.to_string()))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            // 获取文件名
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("roster.csv")
                    .to_string();
            }

            // 读取内容
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| UploadError::Read(e.to_string()))?;
                if file_bytes.len() + data.len() > max_size {
                    return Err(UploadError::TooLarge(max_size));
                }
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err(UploadError::MissingFile);
    }
    if file_name.is_empty() {
        file_name = "roster.csv".to_string();
    }

    Ok((file_bytes, file_name))
}
