use std::sync::Arc;

use tokio::signal;
use tracing::{error, warn};

use crate::storage::Storage;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 关闭数据库连接池
pub async fn close_storage(storage: Arc<dyn Storage>) {
    match storage.close().await {
        Ok(()) => warn!("Database connection closed"),
        Err(e) => error!("{}", e),
    }
}
