//! 上传闸门：在写盘前后校验文件名扩展和大小

use crate::config::UploadConfig;
use crate::errors::{DocVaultError, Result};
use crate::utils::{extension_of, sanitize_filename};

pub struct UploadGate<'a> {
    config: &'a UploadConfig,
}

impl<'a> UploadGate<'a> {
    pub fn new(config: &'a UploadConfig) -> Self {
        Self { config }
    }

    /// 校验文件名，通过时返回清洗后的文件名
    ///
    /// 只看扩展名（大小写不敏感）；客户端声明的 Content-Type 不参与判断。
    pub fn admit_name(&self, declared: &str) -> Result<String> {
        let sanitized = sanitize_filename(declared);
        let extension = extension_of(&sanitized);

        if extension.is_empty()
            || !self
                .config
                .allowed_types
                .iter()
                .any(|t| t.to_lowercase() == extension)
        {
            return Err(DocVaultError::unsupported_file_type(format!(
                "Unsupported file type. Only {} files are allowed!",
                self.config.allowed_types.join(", ")
            )));
        }

        Ok(sanitized)
    }

    /// 校验已接收的累计字节数
    pub fn check_size(&self, received: usize) -> Result<()> {
        if received > self.config.max_size {
            return Err(DocVaultError::file_too_large(format!(
                "File too large! Max {}.",
                human_size(self.config.max_size)
            )));
        }
        Ok(())
    }
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_any_case() {
        let config = UploadConfig::default();
        let gate = UploadGate::new(&config);
        assert_eq!(gate.admit_name("a.pdf").unwrap(), "a.pdf");
        assert_eq!(gate.admit_name("SCAN.PDF").unwrap(), "SCAN.PDF");
        assert_eq!(gate.admit_name("x/../b.Pdf").unwrap(), "b.Pdf");
    }

    #[test]
    fn test_rejects_other_types() {
        let config = UploadConfig::default();
        let gate = UploadGate::new(&config);
        for name in ["virus.exe", "a.pdf.exe", "pdf", ".pdf", "", "notes.txt", "../"] {
            let err = gate.admit_name(name).unwrap_err();
            assert_eq!(err.code(), "E008", "{name} should be rejected");
        }
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let config = UploadConfig::default();
        let gate = UploadGate::new(&config);
        assert!(gate.check_size(0).is_ok());
        assert!(gate.check_size(10 * 1024 * 1024).is_ok());

        let err = gate.check_size(10 * 1024 * 1024 + 1).unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(err.message(), "File too large! Max 10MB.");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(10 * 1024 * 1024), "10MB");
        assert_eq!(human_size(2048), "2KB");
        assert_eq!(human_size(100), "100 bytes");
    }
}
