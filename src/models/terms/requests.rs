use serde::Deserialize;

use super::entities::{AssessmentDraft, Term, TermWeightConfig};

/// 单个学期的配置输入
#[derive(Debug, Clone, Deserialize)]
pub struct TermSetupInput {
    pub term: Term,
    pub pt_weight: i32,
    pub quiz_weight: i32,
    pub exam_weight: i32,
    #[serde(default)]
    pub assessments: Vec<AssessmentDraft>,
}

impl TermSetupInput {
    pub fn weight_config(&self) -> TermWeightConfig {
        TermWeightConfig::new(self.term, self.pt_weight, self.quiz_weight, self.exam_weight)
    }
}

/// 批量保存学期配置请求，任一学期校验失败则整体拒绝
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTermSetupsRequest {
    pub terms: Vec<TermSetupInput>,
}
