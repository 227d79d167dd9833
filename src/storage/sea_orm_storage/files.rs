//! 文件元数据存储操作

use super::SeaOrmStorage;
use crate::entity::pdf_files::{ActiveModel, Column, Entity as PdfFiles};
use crate::errors::{DocVaultError, Result};
use crate::models::files::entities::{FileRecord, NewFileRecord};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建文件记录，上传时间由服务端指定
    pub async fn create_file_record_impl(&self, record: NewFileRecord) -> Result<FileRecord> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            filename: Set(record.filename),
            original_name: Set(record.original_name),
            size: Set(record.size),
            upload_date: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            DocVaultError::database_operation(format!("Failed to save file record: {e}"))
        })?;

        Ok(result.into_file_record())
    }

    /// 通过存储键获取文件记录
    pub async fn get_file_record_by_name_impl(&self, filename: &str) -> Result<Option<FileRecord>> {
        let result = PdfFiles::find()
            .filter(Column::Filename.eq(filename))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into_file_record()))
    }
}
