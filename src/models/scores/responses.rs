use serde::Serialize;
use ts_rs::TS;

use super::entities::AssessmentScore;
use crate::models::terms::entities::Term;

// 学期成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ScoreListResponse {
    pub course_id: i64,
    pub term: Term,
    pub items: Vec<AssessmentScore>,
}
