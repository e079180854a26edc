//! 应用入口 - 命令行驱动
//!
//! 加载风格预设 → 上传图片 → 顺序处理整个批次 → 导出图片和描述清单 → 输出统计

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, ExportError};
use crate::models::{load_images_from_folder, load_style_preset, GlobalConfig};
use crate::orchestrator::{BatchOrchestrator, BatchRunStats};
use crate::services::{ExportService, RemoteEditClient, StudioClient};
use crate::store::{BatchStore, ConfigStore, MAX_BATCH_SIZE};
use crate::utils::logging::{init_log_file, log_images_loaded, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: BatchOrchestrator,
    exporter: ExportService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        log_startup(&config.text_model_name, &config.image_model_name);

        config.validate()?;

        let style = load_style_preset(Path::new(&config.style_file)).await?;
        let client: Arc<dyn RemoteEditClient> = Arc::new(StudioClient::new(&config));

        Ok(Self::with_client(config, style, client))
    }

    /// 使用指定的远程客户端创建应用
    pub fn with_client(
        config: Config,
        style: GlobalConfig,
        client: Arc<dyn RemoteEditClient>,
    ) -> Self {
        let orchestrator = BatchOrchestrator::new(
            Arc::new(BatchStore::new()),
            Arc::new(ConfigStore::with_config(style)),
            client,
        );
        let exporter = ExportService::new(&config);

        Self {
            config,
            orchestrator,
            exporter,
        }
    }

    pub fn orchestrator(&self) -> &BatchOrchestrator {
        &self.orchestrator
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchRunStats> {
        let uploaded = self.upload().await?;
        if uploaded == 0 {
            warn!("⚠️ 没有找到待处理的图片，程序结束");
            return Ok(BatchRunStats::default());
        }

        let stats = self
            .orchestrator
            .process_all()
            .await
            .context("已有整批处理在进行中")?;

        self.export().await?;

        print_final_stats(&stats, &self.config.output_log_file);

        Ok(stats)
    }

    /// 从输入目录上传图片
    ///
    /// 超出批次上限时整批拒绝。同名 `.txt` 文件的内容作为初始描述。
    async fn upload(&self) -> Result<usize> {
        info!("\n📁 正在扫描待处理的图片...");
        let images = load_images_from_folder(&self.config.input_folder).await?;
        log_images_loaded(images.len(), MAX_BATCH_SIZE);

        let store = self.orchestrator.store();
        let ids = store.admit(images.iter().map(|image| image.data_url.clone()))?;

        for (id, image) in ids.iter().zip(&images) {
            if let Some(description) = &image.description {
                store.update_description(*id, description.clone());
            }
        }

        Ok(ids.len())
    }

    /// 导出已完成的图片和描述清单
    async fn export(&self) -> Result<()> {
        let items = self.orchestrator.store().snapshot();

        match self.exporter.export_images(&items).await {
            Ok(_) => {}
            Err(AppError::Export(ExportError::NothingToExport)) => {
                warn!("⚠️ 没有处理成功的图片，跳过导出");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        self.exporter.export_manifest(&items).await?;
        Ok(())
    }
}
