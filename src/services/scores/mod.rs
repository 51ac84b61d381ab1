pub mod list;
pub mod record;
pub mod writer;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::scores::requests::RecordScoresRequest;
use crate::storage::Storage;

pub struct ScoreService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScoreService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学期已录入成绩
    pub async fn list_scores(
        &self,
        course_id: i64,
        term: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_scores(self, course_id, term, request).await
    }

    // 批量录入成绩
    pub async fn record_scores(
        &self,
        course_id: i64,
        term: &str,
        body: RecordScoresRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_scores(self, course_id, term, body, request).await
    }
}
