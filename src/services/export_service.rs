//! 导出服务 - 业务能力层
//!
//! 把已完成的条目写成图片文件和描述清单。编号一律使用条目在整个批次中的位置（从 1 开始），
//! 失败或未处理的条目也占用编号，所以单张下载、批量下载和清单的编号总是一致。

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ExportError};
use crate::models::{BatchItem, ItemId};
use crate::utils::data_url::decode_data_url;

/// 描述清单文件名
pub const MANIFEST_FILE_NAME: &str = "batch_descriptions_mapping.txt";

/// 按批次位置（从 1 开始）生成图片文件名
pub fn image_file_name(position: usize) -> String {
    format!("fan_fc_img_{}.png", position)
}

/// 已完成的条目及其批次位置（从 1 开始）
fn completed_with_positions<'a>(
    items: &'a [BatchItem],
) -> impl Iterator<Item = (usize, &'a BatchItem)> + 'a {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_completed())
        .map(|(idx, item)| (idx + 1, item))
}

/// 生成描述清单；没有已完成条目时返回 None
pub fn build_manifest(items: &[BatchItem]) -> Option<String> {
    let mut completed = completed_with_positions(items).peekable();
    completed.peek()?;

    let mut text = String::from("BATCH DESCRIPTIONS MAPPING\n");
    text.push_str("===========================\n\n");
    for (position, item) in completed {
        text.push_str(&format!(
            "Image #{} ({})\n",
            position,
            image_file_name(position)
        ));
        text.push_str(&format!(
            "Description: {}\n",
            item.rewritten_description.as_deref().unwrap_or("N/A")
        ));
        text.push_str("---------------------------\n\n");
    }
    Some(text)
}

/// 导出服务
pub struct ExportService {
    output_dir: PathBuf,
    stagger: Duration,
}

impl ExportService {
    pub fn new(config: &Config) -> Self {
        Self::with_dir(
            &config.output_folder,
            Duration::from_millis(config.download_stagger_ms),
        )
    }

    pub fn with_dir(output_dir: impl AsRef<Path>, stagger: Duration) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            stagger,
        }
    }

    /// 导出单张已完成的图片
    pub async fn export_single(&self, items: &[BatchItem], id: ItemId) -> AppResult<PathBuf> {
        let (position, item) = completed_with_positions(items)
            .find(|(_, item)| item.id == id)
            .ok_or_else(|| ExportError::ItemNotReady { id: id.to_string() })?;

        self.ensure_output_dir().await?;
        self.write_image(position, item).await
    }

    /// 批量导出所有已完成的图片
    ///
    /// 每个文件之间间隔 `stagger`，避免下载端被限流。
    pub async fn export_images(&self, items: &[BatchItem]) -> AppResult<Vec<PathBuf>> {
        let completed: Vec<(usize, &BatchItem)> = completed_with_positions(items).collect();
        if completed.is_empty() {
            return Err(ExportError::NothingToExport.into());
        }

        self.ensure_output_dir().await?;

        let mut written = Vec::with_capacity(completed.len());
        for (i, (position, item)) in completed.into_iter().enumerate() {
            if i > 0 && !self.stagger.is_zero() {
                tokio::time::sleep(self.stagger).await;
            }
            written.push(self.write_image(position, item).await?);
        }

        info!("✓ 已导出 {} 张图片到 {}", written.len(), self.output_dir.display());
        Ok(written)
    }

    /// 导出描述清单
    pub async fn export_manifest(&self, items: &[BatchItem]) -> AppResult<PathBuf> {
        let text = build_manifest(items).ok_or(ExportError::NothingToExport)?;

        self.ensure_output_dir().await?;
        let path = self.output_dir.join(MANIFEST_FILE_NAME);
        fs::write(&path, text)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("✓ 描述清单已保存: {}", path.display());
        Ok(path)
    }

    async fn write_image(&self, position: usize, item: &BatchItem) -> AppResult<PathBuf> {
        let bytes = item
            .edited_image
            .as_deref()
            .and_then(decode_data_url)
            .ok_or_else(|| ExportError::InvalidImagePayload {
                id: item.id.to_string(),
            })?;

        let path = self.output_dir.join(image_file_name(position));
        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("已写入 {}", path.display());
        Ok(path)
    }

    async fn ensure_output_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            AppError::file_write_failed(self.output_dir.display().to_string(), e)
        })
    }
}
