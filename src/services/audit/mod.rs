pub mod list;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::audit::requests::AuditLogParams;
use crate::storage::Storage;

pub use record::record_audit;

pub struct AuditService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuditService {
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

    // 分页查询审计日志
    pub async fn list_audit_logs(
        &self,
        query: AuditLogParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_audit_logs(self, query, request).await
    }
}
