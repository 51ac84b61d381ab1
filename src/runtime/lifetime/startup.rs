use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 连接数据库并执行迁移
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    info!(
        "Import limits: {} rows, {} bytes per file; export limit: {} rows",
        config.import.max_rows, config.import.max_file_size, config.export.max_rows
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    StartupContext { storage }
}
