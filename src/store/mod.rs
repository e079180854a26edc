//! 存储层
//!
//! - `ConfigStore` - 全局风格指令和文字替换规则
//! - `BatchStore` - 批次条目，独占所有 `BatchItem` 记录
//! - `StoreEvent` - 变更通知

pub mod batch_store;
pub mod config_store;
pub mod events;

pub use batch_store::{BatchStore, MAX_BATCH_SIZE};
pub use config_store::ConfigStore;
pub use events::StoreEvent;
