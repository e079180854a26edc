//! 单个条目处理器 - 编排层
//!
//! ## 职责
//!
//! 把一次流程执行映射为条目状态的变化：
//!
//! ```text
//! pending / completed / error
//!     ↓ set_status(processing)
//! processing
//!     ↓ ItemFlow::run（改写 + 编辑）
//! completed（两者都成功） | error（任一失败，丢弃部分结果）
//! ```
//!
//! 条目在处理途中被移除时，最后的写回变成空操作，不会报错。

use tracing::{debug, error, info};

use crate::models::{ItemId, ItemStatus};
use crate::store::{BatchStore, ConfigStore};
use crate::workflow::{ItemCtx, ItemFlow};

/// 处理单个条目
///
/// # 返回
/// 条目最终的状态；条目不存在（或中途被移除）时返回 None
pub async fn process_item(
    store: &BatchStore,
    config_store: &ConfigStore,
    flow: &ItemFlow,
    id: ItemId,
) -> Option<ItemStatus> {
    let Some(item) = store.get(id) else {
        debug!("条目 {} 不存在，跳过", id);
        return None;
    };
    let position = store.position(id).map(|idx| idx + 1).unwrap_or_default();
    let ctx = ItemCtx::new(id, position);

    store.set_status(id, ItemStatus::Processing);
    info!("{} ⏳ 开始处理", ctx);

    // 配置在发起调用时取快照，之后的修改只影响后续条目
    let config = config_store.snapshot();

    let status = match flow.run(&item, &config, &ctx).await {
        Ok(output) => {
            let stored =
                store.set_result(id, output.edited_image, output.rewritten_description);
            if !stored {
                debug!("{} 处理完成时条目已被移除，结果丢弃", ctx);
                return None;
            }
            info!("{} ✓ 处理完成", ctx);
            ItemStatus::Completed
        }
        Err(e) => {
            error!("{} ❌ 处理失败: {}", ctx, e);
            if !store.mark_error(id) {
                debug!("{} 处理失败时条目已被移除", ctx);
                return None;
            }
            ItemStatus::Error
        }
    };

    Some(status)
}
