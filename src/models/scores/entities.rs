use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生在某评估项上的原始得分，`score` 为空表示尚未录入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct AssessmentScore {
    pub student_id: String,
    pub assessment_id: i64,
    pub score: Option<f64>,
}

impl AssessmentScore {
    pub fn new(student_id: impl Into<String>, assessment_id: i64, score: Option<f64>) -> Self {
        Self {
            student_id: student_id.into(),
            assessment_id,
            score,
        }
    }
}

/// 批量录入成绩的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ScoreEntryRow {
    #[serde(default)]
    pub student_id: String,
    pub assessment_id: Option<i64>,
    pub score: Option<f64>,
}
