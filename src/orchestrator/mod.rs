//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责驱动条目处理和状态流转，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 顺序遍历批次，逐个等待
//! - 跳过已完成的条目
//! - 维护整批处理标志和统计
//!
//! ### `item_processor` - 单个条目处理器
//! - 条目状态机：pending → processing → completed | error
//! - 调用 `ItemFlow`，把结果整体写回存储
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整个批次)
//!     ↓
//! item_processor (处理单个 BatchItem，负责状态)
//!     ↓
//! workflow::ItemFlow (改写 + 编辑，负责合并结果)
//!     ↓
//! services (能力层：rewrite / edit / export)
//! ```

pub mod batch_processor;
pub mod item_processor;

pub use batch_processor::{BatchOrchestrator, BatchRunStats};
pub use item_processor::process_item;
