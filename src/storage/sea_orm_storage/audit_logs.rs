//! 审计日志存储操作

use super::SeaOrmStorage;
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::errors::{GradebookError, Result};
use crate::models::{
    PaginationInfo,
    audit::{
        entities::{AuditLog, NewAuditLog},
        requests::AuditLogParams,
        responses::AuditLogListResponse,
    },
    common::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 写入审计日志
    pub async fn record_audit_impl(&self, entry: NewAuditLog) -> Result<AuditLog> {
        let now = chrono::Utc::now().timestamp();
        let detail = serde_json::to_string(&entry.detail)?;

        let model = ActiveModel {
            action: Set(entry.action.as_str().to_string()),
            course_id: Set(entry.course_id),
            actor: Set(entry.actor),
            detail: Set(detail),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("写入审计日志失败: {e}")))?;

        result
            .into_audit_log()
            .ok_or_else(|| GradebookError::serialization("审计动作无法识别"))
    }

    /// 分页列出审计日志，最新的在前
    pub async fn list_audit_logs_impl(&self, query: AuditLogParams) -> Result<AuditLogListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = AuditLogs::find();

        if let Some(action) = query.action {
            select = select.filter(Column::Action.eq(action.as_str()));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询审计日志总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询审计日志页数失败: {e}")))?;

        let logs = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询审计日志列表失败: {e}")))?;

        Ok(AuditLogListResponse {
            items: logs.into_iter().filter_map(|m| m.into_audit_log()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit::entities::AuditAction;
    use serde_json::json;

    #[tokio::test]
    async fn test_record_and_filter() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();

        storage
            .record_audit_impl(NewAuditLog {
                action: AuditAction::RosterImport,
                course_id: Some(1),
                actor: Some("registrar".to_string()),
                detail: json!({ "imported": 3 }),
            })
            .await
            .unwrap();
        storage
            .record_audit_impl(NewAuditLog {
                action: AuditAction::TermConfigSave,
                course_id: Some(2),
                actor: None,
                detail: json!({ "terms": ["PRELIM"] }),
            })
            .await
            .unwrap();

        let all = storage
            .list_audit_logs_impl(AuditLogParams {
                page: None,
                size: None,
                action: None,
                course_id: None,
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);

        let imports = storage
            .list_audit_logs_impl(AuditLogParams {
                page: None,
                size: None,
                action: Some(AuditAction::RosterImport),
                course_id: None,
            })
            .await
            .unwrap();
        assert_eq!(imports.items.len(), 1);
        assert_eq!(imports.items[0].actor.as_deref(), Some("registrar"));
        assert_eq!(imports.items[0].detail["imported"], 3);
    }
}
