//! 条目处理上下文
//!
//! 封装"我正在处理批次中的第几张图"这一信息，只用于日志

use std::fmt::Display;

use crate::models::ItemId;

/// 条目处理上下文
#[derive(Debug, Clone)]
pub struct ItemCtx {
    pub id: ItemId,

    /// 在批次中的位置（从1开始，仅用于日志显示）
    pub position: usize,
}

impl ItemCtx {
    pub fn new(id: ItemId, position: usize) -> Self {
        Self { id, position }
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[图片 #{}]", self.position)
    }
}
