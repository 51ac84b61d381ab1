use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C，收到后让服务器优雅退出
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received, initiating graceful shutdown..."),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
