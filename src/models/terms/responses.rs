use serde::Serialize;
use ts_rs::TS;

use super::entities::TermSetup;

// 课程学期配置列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/term.ts")]
pub struct TermSetupListResponse {
    pub items: Vec<TermSetup>,
}
