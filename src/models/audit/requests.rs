use serde::Deserialize;

use super::entities::AuditAction;

/// 审计日志查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub action: Option<AuditAction>,
    pub course_id: Option<i64>,
}
