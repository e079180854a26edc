use crate::error::{AppError, FileError};
use crate::utils::data_url::{encode_data_url, mime_from_extension};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// 从文件夹读取到的一张待上传图片
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    /// data URL 形式的图片内容
    pub data_url: String,
    /// 同名 `.txt` 文件中的描述（可选）
    pub description: Option<String>,
}

/// 从文件夹中加载所有图片（按文件名排序）
pub async fn load_images_from_folder(folder_path: &str) -> Result<Vec<UploadedImage>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut image_paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(mime_from_extension)
            .is_some();
        if is_image {
            image_paths.push(path);
        }
    }
    image_paths.sort();

    let mut images = Vec::with_capacity(image_paths.len());
    for path in image_paths {
        images.push(load_image(&path).await?);
    }

    Ok(images)
}

/// 加载单张图片及其描述文件
async fn load_image(path: &Path) -> Result<UploadedImage> {
    let mime = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(mime_from_extension)
        .with_context(|| format!("不支持的图片格式: {}", path.display()))?;

    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let description = read_sidecar(&path.with_extension("txt")).await;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    debug!("已加载图片: {} ({} 字节)", file_name, bytes.len());

    Ok(UploadedImage {
        file_name,
        data_url: encode_data_url(&bytes, mime),
        description,
    })
}

/// 读取同名描述文件
///
/// 文件不存在时返回 None；其他读取失败（权限、非 UTF-8）记录警告后同样忽略。
async fn read_sidecar(path: &Path) -> Option<String> {
    match fs::read_to_string(path).await {
        Ok(text) => Some(text.trim().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!("⚠️ 无法读取描述文件 {}，忽略: {}", path.display(), e);
            None
        }
    }
}
