use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::ImportOutcome;
use crate::models::students::entities::Student;

/// 汇总中的单条错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct ImportErrorEntry {
    pub student_id: String,
    pub message: String,
}

/// 批量导入汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportErrorEntry>,
    pub total: usize,
    pub detailed_feedback: Vec<ImportOutcome>,
}

// 课程花名册响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct RosterResponse {
    pub course_id: i64,
    pub items: Vec<Student>,
}
