use serde::{Deserialize, Serialize};

/// 上传成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct FileUploadResponse {
    /// 存储键
    pub filename: String,
    /// 文件大小(字节)
    pub size: i64,
}
