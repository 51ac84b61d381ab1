use std::sync::Arc;

use tracing::{info, warn};

use crate::models::audit::entities::NewAuditLog;
use crate::storage::Storage;

/// 追加一条审计记录；写入失败只记日志，不影响已完成的业务操作
pub async fn record_audit(storage: &Arc<dyn Storage>, entry: NewAuditLog) {
    let action = entry.action;
    let course_id = entry.course_id;

    match storage.record_audit(entry).await {
        Ok(log) => info!(
            "Audit {} recorded for course {:?} by {:?}",
            log.action, log.course_id, log.actor
        ),
        Err(e) => warn!("Failed to record audit {} for course {:?}: {}", action, course_id, e),
    }
}
