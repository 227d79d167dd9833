use serde::Serialize;

/// 用户记录
///
/// 密码按原样保存，不做哈希处理，不随响应返回。
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
