use serde::{Deserialize, Serialize};

/// 已持久化的 PDF 元数据记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    // 存储键（内容存储中的文件名）
    pub filename: String,
    // 清洗后的原始文件名
    pub original_name: String,
    // 实际写入的字节数
    pub size: i64,
    pub upload_date: chrono::DateTime<chrono::Utc>,
}

/// 新建文件记录所需的数据
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub filename: String,
    pub original_name: String,
    pub size: i64,
}
