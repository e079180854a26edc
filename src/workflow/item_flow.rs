//! 条目处理流程 - 流程层
//!
//! 核心职责：定义"一张图"的处理流程
//!
//! 改写和编辑两个远程调用同时发出，等两者都结束后再合并结果：
//! 任一失败则整体失败，已成功的另一半直接丢弃。

use futures::future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ApiError, AppResult};
use crate::models::{BatchItem, GlobalConfig};
use crate::services::rewrite_service::EMPTY_DESCRIPTION_FALLBACK;
use crate::services::RemoteEditClient;
use crate::utils::logging::truncate_text;
use crate::workflow::item_ctx::ItemCtx;

/// 单个条目的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutput {
    pub edited_image: String,
    pub rewritten_description: String,
}

/// 条目处理流程
///
/// - 不持有任何存储
/// - 不修改条目状态
/// - 只依赖远程客户端
pub struct ItemFlow {
    client: Arc<dyn RemoteEditClient>,
}

impl ItemFlow {
    pub fn new(client: Arc<dyn RemoteEditClient>) -> Self {
        Self { client }
    }

    pub async fn run(
        &self,
        item: &BatchItem,
        config: &GlobalConfig,
        ctx: &ItemCtx,
    ) -> AppResult<ItemOutput> {
        info!(
            "{} 描述: {}",
            ctx,
            truncate_text(&item.original_description, 80)
        );
        debug!("{} 同时发起改写和编辑请求", ctx);

        let rewrite = self.client.rewrite(&item.original_description);
        let edit = self.client.edit(&item.original_image, config);
        let (rewritten_description, edited) = future::join(rewrite, edit).await;

        let edited_image = edited?;
        if edited_image.is_empty() {
            return Err(ApiError::EmptyResponse {
                endpoint: "edit".to_string(),
            }
            .into());
        }

        let rewritten_description = if rewritten_description.trim().is_empty() {
            warn!("{} 改写结果为空，使用原描述", ctx);
            fallback_description(&item.original_description)
        } else {
            rewritten_description
        };

        Ok(ItemOutput {
            edited_image,
            rewritten_description,
        })
    }
}

/// 改写结果为空时的兜底描述，保证完成的条目总有非空描述
fn fallback_description(original: &str) -> String {
    if original.trim().is_empty() {
        EMPTY_DESCRIPTION_FALLBACK.to_string()
    } else {
        original.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;
    use async_trait::async_trait;

    struct FixedClient {
        rewrite: &'static str,
        edit: &'static str,
    }

    #[async_trait]
    impl RemoteEditClient for FixedClient {
        async fn rewrite(&self, _description: &str) -> String {
            self.rewrite.to_string()
        }

        async fn edit(&self, _image: &str, _config: &GlobalConfig) -> AppResult<String> {
            Ok(self.edit.to_string())
        }
    }

    fn flow(rewrite: &'static str, edit: &'static str) -> ItemFlow {
        ItemFlow::new(Arc::new(FixedClient { rewrite, edit }))
    }

    fn item(description: &str) -> BatchItem {
        let mut item = BatchItem::new("data:image/png;base64,QUJD");
        item.original_description = description.to_string();
        item
    }

    #[tokio::test]
    async fn test_outputs_are_passed_through() {
        let output = flow("golden hour sprint", "data:image/png;base64,RUQ=")
            .run(&item("sunset run"), &GlobalConfig::default(), &ItemCtx::new(ItemId::new(), 1))
            .await
            .unwrap();
        assert_eq!(output.rewritten_description, "golden hour sprint");
        assert_eq!(output.edited_image, "data:image/png;base64,RUQ=");
    }

    #[tokio::test]
    async fn test_empty_rewrite_falls_back_to_original() {
        let ctx = ItemCtx::new(ItemId::new(), 1);
        let output = flow("  ", "data:image/png;base64,RUQ=")
            .run(&item("sunset run"), &GlobalConfig::default(), &ctx)
            .await
            .unwrap();
        assert_eq!(output.rewritten_description, "sunset run");

        let output = flow("", "data:image/png;base64,RUQ=")
            .run(&item(""), &GlobalConfig::default(), &ctx)
            .await
            .unwrap();
        assert_eq!(output.rewritten_description, EMPTY_DESCRIPTION_FALLBACK);
    }

    #[tokio::test]
    async fn test_empty_edit_is_error() {
        let result = flow("golden hour sprint", "")
            .run(&item("sunset run"), &GlobalConfig::default(), &ItemCtx::new(ItemId::new(), 1))
            .await;
        assert!(matches!(
            result,
            Err(crate::error::AppError::Api(ApiError::EmptyResponse { .. }))
        ));
    }
}
