use crate::config::AppConfig;
use crate::errors::{DocVaultError, Result};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
///
/// 数据库连接必须在开始接收请求之前建立成功。
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    // 上传目录也会在首次上传时按需创建
    tokio::fs::create_dir_all(&config.upload.dir)
        .await
        .map_err(|e| {
            DocVaultError::file_operation(format!(
                "Failed to create upload directory {}: {e}",
                config.upload.dir
            ))
        })?;
    warn!("Upload directory ready at {}", config.upload.dir);

    Ok(StartupContext { storage })
}
