pub mod list;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::terms::requests::SaveTermSetupsRequest;
use crate::storage::Storage;

pub struct TermService {
    storage: Option<Arc<dyn Storage>>,
}

impl TermService {
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

    // 课程全部学期配置
    pub async fn list_term_setups(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_term_setups(self, course_id, request).await
    }

    // 整批保存学期配置
    pub async fn save_term_setups(
        &self,
        course_id: i64,
        body: SaveTermSetupsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_term_setups(self, course_id, body, request).await
    }
}
