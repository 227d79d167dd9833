//! 客户端文件名清洗与存储键生成

use once_cell::sync::Lazy;
use regex::Regex;

/// 清洗后文件名的最大字节数
pub const MAX_FILENAME_BYTES: usize = 200;

// Windows 保留字符
static RESERVED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"|?*]"#).expect("Invalid reserved character regex"));

/// 清洗客户端声明的文件名
///
/// 只保留最后一个路径分量，去掉控制字符，替换保留字符并去掉前导点号。
/// 超长时从头部截断，保证扩展名不丢失。结果可能为空串。
pub fn sanitize_filename(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let filtered: String = last.chars().filter(|c| !c.is_control()).collect();
    let replaced = RESERVED_RE.replace_all(filtered.trim(), "_");
    let name = replaced.trim_start_matches('.').trim();
    truncate_front(name, MAX_FILENAME_BYTES).to_string()
}

// 从头部截断到不超过 max 字节，保持 UTF-8 边界
fn truncate_front(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

/// 生成存储键：`<纳秒时间戳>-<清洗后的文件名>`
pub fn storage_key(sanitized_name: &str) -> String {
    let now = chrono::Utc::now();
    let prefix = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());
    format!("{prefix}-{sanitized_name}")
}

/// 小写扩展名（含点号），没有扩展名时返回空串
pub fn extension_of(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
