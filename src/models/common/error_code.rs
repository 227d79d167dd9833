use serde::Serialize;

/// API 响应中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    ValidationFailed = 1000,
    InternalServerError = 1001,

    // 文件相关 2xxx
    FileNotFound = 2000,
    FileUploadFailed = 2001,
    FileTypeNotAllowed = 2002,
    FileSizeExceeded = 2003,
    FileStorageFailed = 2004,

    // 用户相关 3xxx
    UserAlreadyExists = 3000,

    // 数据库相关 5xxx
    DatabaseUnavailable = 5000,
    DatabaseOperationFailed = 5001,
}
