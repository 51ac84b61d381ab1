//! 审计日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub action: String,
    pub course_id: Option<i64>,
    pub actor: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub detail: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 动作无法识别的记录返回 None
    pub fn into_audit_log(self) -> Option<crate::models::audit::entities::AuditLog> {
        use crate::models::audit::entities::{AuditAction, AuditLog};
        use chrono::{DateTime, Utc};

        Some(AuditLog {
            id: self.id,
            action: self.action.parse::<AuditAction>().ok()?,
            course_id: self.course_id,
            actor: self.actor,
            detail: serde_json::from_str(&self.detail).unwrap_or(serde_json::Value::Null),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        })
    }
}
