//! 批次存储的变更通知
//!
//! 观察者（界面或测试）通过 `BatchStore::subscribe` 订阅，每次记录整体替换后推送一次。

use crate::models::{ItemId, ItemStatus};

/// 存储变更事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// 新条目加入批次
    ItemAdded { id: ItemId },
    /// 条目被移除
    ItemRemoved { id: ItemId },
    /// 条目记录被替换（描述、状态或结果变化）
    ItemUpdated { id: ItemId, status: ItemStatus },
}
