use serde::Serialize;
use ts_rs::TS;

use super::entities::AuditLog;
use crate::models::common::PaginationInfo;

// 审计日志列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub struct AuditLogListResponse {
    pub items: Vec<AuditLog>,
    pub pagination: PaginationInfo,
}
