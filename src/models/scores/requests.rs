use serde::Deserialize;

use super::entities::ScoreEntryRow;

/// 批量录入成绩请求
#[derive(Debug, Clone, Deserialize)]
pub struct RecordScoresRequest {
    pub rows: Vec<ScoreEntryRow>,
}
