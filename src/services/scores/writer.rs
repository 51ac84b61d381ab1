use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::Result;
use crate::grading::ScoreWriter;
use crate::storage::Storage;

/// 以存储层为后端的成绩写入
pub struct StorageScoreWriter {
    storage: Arc<dyn Storage>,
}

impl StorageScoreWriter {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ScoreWriter for StorageScoreWriter {
    async fn write_score(
        &self,
        assessment_id: i64,
        student_id: &str,
        score: Option<f64>,
    ) -> Result<()> {
        self.storage
            .upsert_score(assessment_id, student_id, score)
            .await
    }
}
