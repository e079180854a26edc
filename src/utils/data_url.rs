//! data URL 工具
//!
//! 图片在系统内部一律以 `data:<mime>;base64,<data>` 文本形式流转。

use base64::{engine::general_purpose, Engine as _};

/// 默认图片 MIME 类型
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// 将二进制数据编码为 data URL
pub fn encode_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// 拆分 data URL，返回 (mime, base64 数据)
///
/// 没有 `data:` 头时整个字符串视为 base64 数据，MIME 取默认值。
pub fn split_data_url(data_url: &str) -> (&str, &str) {
    match data_url.split_once(',') {
        Some((header, data)) => {
            let mime = header
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MIME);
            (mime, data)
        }
        None => (DEFAULT_IMAGE_MIME, data_url),
    }
}

/// 解码 data URL 中的二进制数据
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let (_, data) = split_data_url(data_url);
    general_purpose::STANDARD.decode(data.trim()).ok()
}

/// 根据文件扩展名推断图片 MIME 类型
pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
