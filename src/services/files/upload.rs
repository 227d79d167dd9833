use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use super::{FileService, UploadGate};
use crate::config::UploadConfig;
use crate::errors::{DocVaultError, Result};
use crate::models::ApiResponse;
use crate::models::files::entities::{FileRecord, NewFileRecord};
use crate::models::files::responses::FileUploadResponse;
use crate::storage::Storage;
use crate::utils::storage_key;

// 时间戳前缀碰撞时的重试次数
const MAX_KEY_ATTEMPTS: usize = 8;

/// 已完整写入内容存储、尚未登记元数据的文件
#[derive(Debug)]
struct StoredFile {
    key: String,
    path: PathBuf,
    original_name: String,
    size: usize,
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(req);
    let config = service.get_upload_config(req);

    let record = receive_and_store(storage.as_ref(), &config, payload).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        FileUploadResponse {
            filename: record.filename,
            size: record.size,
        },
        "PDF uploaded successfully!",
    )))
}

/// 接收上传、写入内容存储并创建元数据记录
///
/// 任何拒绝或写入失败都会删除已落盘的字节。元数据写入失败时文件保留在磁盘上，
/// 不做补偿删除。
pub async fn receive_and_store(
    storage: &dyn Storage,
    config: &UploadConfig,
    mut payload: Multipart,
) -> Result<FileRecord> {
    let gate = UploadGate::new(config);
    let dir = Path::new(&config.dir);

    let mut stored = None;
    if let Err(e) = receive_fields(&gate, config, dir, &mut payload, &mut stored).await {
        if let Some(file) = stored.take() {
            discard(&file.path).await;
        }
        debug!("Upload rejected: {}", e);
        return Err(e);
    }

    let Some(file) = stored else {
        return Err(DocVaultError::no_file_uploaded("No file uploaded!"));
    };

    let record = storage
        .create_file_record(NewFileRecord {
            filename: file.key.clone(),
            original_name: file.original_name,
            size: file.size as i64,
        })
        .await
        .inspect_err(|e| {
            error!(
                "File {} was stored but its metadata record failed, leaving it in place: {}",
                file.path.display(),
                e
            );
        })?;

    info!("Stored upload {} ({} bytes)", record.filename, record.size);
    Ok(record)
}

async fn receive_fields(
    gate: &UploadGate<'_>,
    config: &UploadConfig,
    dir: &Path,
    payload: &mut Multipart,
    stored: &mut Option<StoredFile>,
) -> Result<()> {
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(()),
            // 非 multipart 请求视为没有上传文件
            Err(MultipartError::ContentTypeMissing | MultipartError::ContentTypeIncompatible) => {
                return Err(DocVaultError::no_file_uploaded("No file uploaded!"));
            }
            Err(e) => return Err(upload_error(e)),
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let declared_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        // 普通文本字段直接丢弃
        let Some(declared_name) = declared_name else {
            drain(&mut field).await?;
            continue;
        };

        if name != config.field_name {
            return Err(DocVaultError::upload_interrupted(format!(
                "File upload error: Unexpected field '{name}'"
            )));
        }
        if stored.is_some() {
            return Err(DocVaultError::upload_interrupted(
                "File upload error: Only one file can be uploaded at a time",
            ));
        }

        let sanitized = gate.admit_name(&declared_name)?;

        // Content-Type 由客户端声明，仅记录不校验
        debug!(
            "Admitted upload {:?} declared as {:?}",
            sanitized,
            field.content_type().map(|ct| ct.to_string())
        );

        *stored = Some(write_field(gate, dir, sanitized, &mut field).await?);
    }
}

async fn write_field(
    gate: &UploadGate<'_>,
    dir: &Path,
    sanitized: String,
    field: &mut Field,
) -> Result<StoredFile> {
    fs::create_dir_all(dir).await.map_err(|e| {
        DocVaultError::file_operation(format!("Failed to create upload directory: {e}"))
    })?;

    let (key, path, mut file) = create_exclusive(dir, || storage_key(&sanitized)).await?;

    match stream_into(gate, field, &mut file).await {
        Ok(size) => Ok(StoredFile {
            key,
            path,
            original_name: sanitized,
            size,
        }),
        Err(e) => {
            drop(file);
            discard(&path).await;
            Err(e)
        }
    }
}

// 以独占方式创建目标文件，绝不覆盖已有文件
async fn create_exclusive(
    dir: &Path,
    mut next_key: impl FnMut() -> String,
) -> Result<(String, PathBuf, File)> {
    for _ in 0..MAX_KEY_ATTEMPTS {
        let key = next_key();
        let path = dir.join(&key);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((key, path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("Storage key {} already taken, drawing a new one", key);
            }
            Err(e) => {
                return Err(DocVaultError::file_operation(format!(
                    "Failed to create file: {e}"
                )));
            }
        }
    }

    Err(DocVaultError::file_operation(
        "Failed to allocate a unique storage key",
    ))
}

async fn stream_into(gate: &UploadGate<'_>, field: &mut Field, file: &mut File) -> Result<usize> {
    let mut total_size: usize = 0;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(upload_error)?;

        total_size += data.len();
        gate.check_size(total_size)?;

        file.write_all(&data)
            .await
            .map_err(|e| DocVaultError::file_operation(format!("Failed to write file: {e}")))?;
    }

    file.flush().await?;
    file.sync_all().await?;
    Ok(total_size)
}

async fn drain(field: &mut Field) -> Result<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(upload_error)?;
    }
    Ok(())
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await
        && e.kind() != ErrorKind::NotFound
    {
        warn!("Failed to remove partial upload {}: {}", path.display(), e);
    }
}

fn upload_error(err: MultipartError) -> DocVaultError {
    DocVaultError::upload_interrupted(format!("File upload error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_create_exclusive_skips_taken_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1-a.pdf"), b"existing").unwrap();

        let mut stamp = 0;
        let (key, path, mut file) = create_exclusive(dir.path(), || {
            stamp += 1;
            format!("{stamp}-a.pdf")
        })
        .await
        .unwrap();
        assert_eq!(key, "2-a.pdf");
        assert_eq!(path, dir.path().join("2-a.pdf"));

        file.write_all(b"new").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        assert_eq!(std::fs::read(dir.path().join("1-a.pdf")).unwrap(), b"existing");
        assert_eq!(std::fs::read(dir.path().join("2-a.pdf")).unwrap(), b"new");
    }

    #[actix_web::test]
    async fn test_create_exclusive_gives_up_after_repeated_collisions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1-a.pdf"), b"existing").unwrap();

        let mut attempts = 0;
        let err = create_exclusive(dir.path(), || {
            attempts += 1;
            "1-a.pdf".to_string()
        })
        .await
        .unwrap_err();

        assert_eq!(err.code(), "E004");
        assert_eq!(err.message(), "Failed to allocate a unique storage key");
        assert_eq!(attempts, MAX_KEY_ATTEMPTS);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(std::fs::read(dir.path().join("1-a.pdf")).unwrap(), b"existing");
    }
}
