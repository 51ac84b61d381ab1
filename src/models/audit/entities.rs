use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 审计动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub enum AuditAction {
    RosterImport,
    ScoreEntry,
    TermConfigSave,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::RosterImport => "roster_import",
            AuditAction::ScoreEntry => "score_entry",
            AuditAction::TermConfigSave => "term_config_save",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roster_import" => Ok(AuditAction::RosterImport),
            "score_entry" => Ok(AuditAction::ScoreEntry),
            "term_config_save" => Ok(AuditAction::TermConfigSave),
            _ => Err(format!("Invalid audit action: {s}")),
        }
    }
}

// 审计日志
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub struct AuditLog {
    pub id: i64,
    pub action: AuditAction,
    pub course_id: Option<i64>,
    pub actor: Option<String>,
    #[ts(type = "unknown")]
    pub detail: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// 待写入的审计记录
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub action: AuditAction,
    pub course_id: Option<i64>,
    pub actor: Option<String>,
    pub detail: serde_json::Value,
}
