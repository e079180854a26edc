//! 生成式服务客户端
//!
//! 把改写服务和图片编辑服务组合成编排层使用的 `RemoteEditClient`。

use async_trait::async_trait;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::GlobalConfig;
use crate::services::image_edit_service::ImageEditService;
use crate::services::remote_client::RemoteEditClient;
use crate::services::rewrite_service::RewriteService;

pub struct StudioClient {
    rewrite_service: RewriteService,
    image_edit_service: ImageEditService,
}

impl StudioClient {
    pub fn new(config: &Config) -> Self {
        Self {
            rewrite_service: RewriteService::new(config),
            image_edit_service: ImageEditService::new(config),
        }
    }
}

#[async_trait]
impl RemoteEditClient for StudioClient {
    async fn rewrite(&self, description: &str) -> String {
        self.rewrite_service.rewrite_description(description).await
    }

    async fn edit(&self, image: &str, config: &GlobalConfig) -> AppResult<String> {
        self.image_edit_service.edit_image(image, config).await
    }
}
