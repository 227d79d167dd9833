#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use rust_docvault::config::{DatabaseConfig, UploadConfig};
use rust_docvault::storage::{Storage, create_storage};
use tempfile::TempDir;

pub const BOUNDARY: &str = "----docvault-test-boundary";

/// 每个测试独立的临时数据库和上传目录
pub struct TestContext {
    pub temp_dir: TempDir,
    pub storage: Arc<dyn Storage>,
    pub upload_config: UploadConfig,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_max_size(UploadConfig::default().max_size).await
    }

    pub async fn with_max_size(max_size: usize) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let database = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            pool_size: 4,
            timeout: 5,
        };
        let storage = create_storage(&database)
            .await
            .expect("Failed to create test storage");

        let upload_config = UploadConfig {
            dir: temp_dir
                .path()
                .join("uploads")
                .to_string_lossy()
                .into_owned(),
            max_size,
            ..UploadConfig::default()
        };

        Self {
            temp_dir,
            storage,
            upload_config,
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.upload_config.dir)
    }

    /// 上传目录中的全部文件，目录不存在时为空
    pub fn stored_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.upload_dir()) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// 构建与 main 相同路由的测试服务
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(rust_docvault::utils::json_error_handler),
                )
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.upload_config.clone()))
                .configure(rust_docvault::routes::configure_routes),
        )
        .await
    };
}

/// multipart 表单中的一个分段
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            filename: Some(filename),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn pdf(filename: &'a str, data: &'a [u8]) -> Self {
        Self::file("pdf", filename, "application/pdf", data)
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(parts: &[Part<'_>]) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::post()
        .uri("/upload")
        .insert_header(("content-type", multipart_content_type()))
        .set_payload(multipart_body(parts))
}
