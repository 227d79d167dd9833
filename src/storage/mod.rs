use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    files::entities::{FileRecord, NewFileRecord},
    users::{entities::User, requests::CreateUserRequest},
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，email 重复时返回 Conflict
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 文件管理方法
    // 创建文件元数据记录
    async fn create_file_record(&self, record: NewFileRecord) -> Result<FileRecord>;
    // 通过存储键获取文件记录
    async fn get_file_record_by_name(&self, filename: &str) -> Result<Option<FileRecord>>;

    /// 关闭底层连接池
    async fn close(&self) -> Result<()>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
