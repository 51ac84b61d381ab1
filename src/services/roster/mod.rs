pub mod gateway;
pub mod import;
pub mod list;
pub mod parse;
pub mod template;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct RosterService {
    storage: Option<Arc<dyn Storage>>,
}

impl RosterService {
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

    // 课程花名册
    pub async fn list_roster(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_roster(self, course_id, request).await
    }

    // 从 CSV / XLSX 导入花名册
    pub async fn import_roster(
        &self,
        course_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_roster(self, course_id, payload, request).await
    }

    // 下载导入模板
    pub async fn download_template(&self, format: &str) -> ActixResult<HttpResponse> {
        template::download_template(format).await
    }
}
