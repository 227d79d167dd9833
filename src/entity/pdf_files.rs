//! PDF 文件元数据实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pdf_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub upload_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_file_record(self) -> crate::models::files::entities::FileRecord {
        use crate::models::files::entities::FileRecord;
        use chrono::{DateTime, Utc};

        FileRecord {
            id: self.id,
            filename: self.filename,
            original_name: self.original_name,
            size: self.size,
            upload_date: DateTime::<Utc>::from_timestamp_millis(self.upload_date)
                .unwrap_or_default(),
        }
    }
}
