//! 批次条目存储
//!
//! 有序集合，按插入顺序排列，以 `ItemId` 定位。每次修改都整体替换条目记录，
//! 观察者拿到的永远是完整的记录，不会看到改了一半的状态。

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::AdmissionError;
use crate::models::{BatchItem, ItemId, ItemStatus};
use crate::store::events::StoreEvent;

/// 批次上限
pub const MAX_BATCH_SIZE: usize = 20;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// 批次存储
pub struct BatchStore {
    items: RwLock<Vec<BatchItem>>,
    events: broadcast::Sender<StoreEvent>,
}

impl BatchStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            items: RwLock::new(Vec::new()),
            events,
        }
    }

    /// 订阅变更通知
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// 追加单个条目，超出上限时拒绝
    pub fn add(&self, item: BatchItem) -> Result<ItemId, AdmissionError> {
        let id = item.id;
        {
            let mut items = self.write_items();
            Self::check_capacity(items.len(), 1)?;
            items.push(item);
        }
        self.publish(StoreEvent::ItemAdded { id });
        Ok(id)
    }

    /// 上传入口：每张图片生成一个 pending 条目
    ///
    /// 整体准入：只要总数会超过上限，整批拒绝，存储保持不变。
    pub fn admit<I, S>(&self, images: I) -> Result<Vec<ItemId>, AdmissionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let new_items: Vec<BatchItem> = images.into_iter().map(BatchItem::new).collect();
        let ids: Vec<ItemId> = new_items.iter().map(|item| item.id).collect();

        {
            let mut items = self.write_items();
            if let Err(e) = Self::check_capacity(items.len(), new_items.len()) {
                warn!("⚠️ 上传被拒绝: {}", e);
                return Err(e);
            }
            items.extend(new_items);
        }

        debug!("✓ 已加入 {} 个新条目", ids.len());
        for id in &ids {
            self.publish(StoreEvent::ItemAdded { id: *id });
        }
        Ok(ids)
    }

    /// 移除条目，任何状态下都可以；不存在时不做任何事
    pub fn remove(&self, id: ItemId) -> bool {
        let removed = {
            let mut items = self.write_items();
            let before = items.len();
            items.retain(|item| item.id != id);
            items.len() != before
        };
        if removed {
            self.publish(StoreEvent::ItemRemoved { id });
        }
        removed
    }

    /// 替换原始描述，任何状态下都可以
    pub fn update_description(&self, id: ItemId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.replace_with(id, |item| BatchItem {
            original_description: text,
            ..item.clone()
        })
    }

    /// 设置状态（仅供编排层使用）
    pub(crate) fn set_status(&self, id: ItemId, status: ItemStatus) -> bool {
        self.replace_with(id, |item| BatchItem {
            status,
            ..item.clone()
        })
    }

    /// 写入两项结果并标记完成，一次替换完成
    pub(crate) fn set_result(
        &self,
        id: ItemId,
        edited_image: String,
        rewritten_description: String,
    ) -> bool {
        self.replace_with(id, |item| BatchItem {
            edited_image: Some(edited_image),
            rewritten_description: Some(rewritten_description),
            status: ItemStatus::Completed,
            ..item.clone()
        })
    }

    /// 标记失败并清空旧的输出
    pub(crate) fn mark_error(&self, id: ItemId) -> bool {
        self.replace_with(id, |item| BatchItem {
            edited_image: None,
            rewritten_description: None,
            status: ItemStatus::Error,
            ..item.clone()
        })
    }

    pub fn get(&self, id: ItemId) -> Option<BatchItem> {
        self.read_items().iter().find(|item| item.id == id).cloned()
    }

    /// 条目在批次中的位置（从 0 开始）
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.read_items().iter().position(|item| item.id == id)
    }

    /// 所有条目的快照（按显示顺序）
    pub fn snapshot(&self) -> Vec<BatchItem> {
        self.read_items().clone()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.read_items().iter().map(|item| item.id).collect()
    }

    pub fn len(&self) -> usize {
        self.read_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_items().is_empty()
    }

    pub fn count_by_status(&self, status: ItemStatus) -> usize {
        self.read_items()
            .iter()
            .filter(|item| item.status == status)
            .count()
    }

    /// 批次非空且全部完成
    pub fn all_completed(&self) -> bool {
        let items = self.read_items();
        !items.is_empty() && items.iter().all(BatchItem::is_completed)
    }

    pub fn has_completed(&self) -> bool {
        self.read_items().iter().any(BatchItem::is_completed)
    }

    // ========== 内部辅助 ==========

    fn check_capacity(current: usize, incoming: usize) -> Result<(), AdmissionError> {
        if current + incoming > MAX_BATCH_SIZE {
            return Err(AdmissionError::BatchLimitExceeded {
                current,
                incoming,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }

    /// 以新记录整体替换旧记录；条目不存在时返回 false
    fn replace_with(&self, id: ItemId, f: impl FnOnce(&BatchItem) -> BatchItem) -> bool {
        let status = {
            let mut items = self.write_items();
            let Some(slot) = items.iter_mut().find(|item| item.id == id) else {
                return false;
            };
            *slot = f(slot);
            slot.status
        };
        self.publish(StoreEvent::ItemUpdated { id, status });
        true
    }

    fn publish(&self, event: StoreEvent) {
        // 没有订阅者不算错误
        let _ = self.events.send(event);
    }

    fn read_items(&self) -> RwLockReadGuard<'_, Vec<BatchItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_items(&self) -> RwLockWriteGuard<'_, Vec<BatchItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BatchStore {
    fn default() -> Self {
        Self::new()
    }
}
