//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及 HTTP 状态映射。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - api_code() 方法 - 返回 API 响应中的业务错误码
/// - 便捷构造函数
macro_rules! define_docvault_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident, $api_code:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DocVaultError {
            $($variant(String),)*
        }

        impl DocVaultError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DocVaultError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DocVaultError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DocVaultError::$variant(msg) => msg,)*
                }
            }

            /// HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(DocVaultError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// API 业务错误码
            pub fn api_code(&self) -> ErrorCode {
                match self {
                    $(DocVaultError::$variant(_) => ErrorCode::$api_code,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DocVaultError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DocVaultError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_docvault_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR, InternalServerError),
    DatabaseConnection("E002", "Database Connection Error", SERVICE_UNAVAILABLE, DatabaseUnavailable),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR, DatabaseOperationFailed),
    FileOperation("E004", "File Operation Error", INTERNAL_SERVER_ERROR, FileStorageFailed),
    Validation("E005", "Validation Error", BAD_REQUEST, ValidationFailed),
    Conflict("E006", "Conflict Error", BAD_REQUEST, UserAlreadyExists),
    FileTooLarge("E007", "File Too Large", BAD_REQUEST, FileSizeExceeded),
    UnsupportedFileType("E008", "Unsupported File Type", BAD_REQUEST, FileTypeNotAllowed),
    NoFileUploaded("E009", "No File Uploaded", BAD_REQUEST, FileNotFound),
    UploadInterrupted("E010", "Upload Error", BAD_REQUEST, FileUploadFailed),
}

impl DocVaultError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于客户端可修正的错误
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl fmt::Display for DocVaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DocVaultError {}

// 请求边界：错误类型到 HTTP 响应的唯一映射点
impl ResponseError for DocVaultError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if !self.is_client_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.status())
            .json(ApiResponse::error_empty(self.api_code(), self.message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DocVaultError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                DocVaultError::Conflict(detail)
            }
            _ => match err {
                sea_orm::DbErr::Conn(e) => DocVaultError::DatabaseConnection(e.to_string()),
                other => DocVaultError::DatabaseOperation(other.to_string()),
            },
        }
    }
}

impl From<std::io::Error> for DocVaultError {
    fn from(err: std::io::Error) -> Self {
        DocVaultError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DocVaultError::database_config("test").code(), "E001");
        assert_eq!(DocVaultError::validation("test").code(), "E005");
        assert_eq!(DocVaultError::conflict("test").code(), "E006");
        assert_eq!(DocVaultError::upload_interrupted("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DocVaultError::file_too_large("test").error_type(),
            "File Too Large"
        );
        assert_eq!(
            DocVaultError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DocVaultError::unsupported_file_type("Only PDF files are allowed");
        assert_eq!(err.message(), "Only PDF files are allowed");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            DocVaultError::file_too_large("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DocVaultError::no_file_uploaded("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DocVaultError::conflict("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            DocVaultError::file_operation("disk full").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            DocVaultError::database_connection("down").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert!(DocVaultError::validation("x").is_client_error());
        assert!(!DocVaultError::database_operation("x").is_client_error());
    }

    #[test]
    fn test_io_error_is_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DocVaultError = io.into();
        assert_eq!(err.code(), "E004");
        assert!(err.message().contains("denied"));
    }

    #[test]
    fn test_format_simple() {
        let err = DocVaultError::validation("Name is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Name is required"));
    }
}
