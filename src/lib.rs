//! # Batch Studio
//!
//! 批量改图工具：上传最多 20 张图片，为每张图附上描述，调用生成式服务
//! 按统一的风格指令编辑图片并改写描述，最后逐张或批量导出。
//!
//! ## 架构设计
//!
//! ### ① 存储层（Store）
//! - `ConfigStore` - 全局风格指令和文字替换规则
//! - `BatchStore` - 批次条目，整体替换式更新，带变更通知
//!
//! ### ② 业务能力层（Services）
//! - `RemoteEditClient` - 改写 / 编辑两个远程能力
//! - `RewriteService` / `ImageEditService` - 真实的远程实现
//! - `ExportService` - 导出图片和描述清单
//!
//! ### ③ 流程层（Workflow）
//! - `ItemFlow` - 一张图的处理流程（改写 + 编辑，合并结果）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/item_processor` - 单个条目的状态流转
//! - `orchestrator/batch_processor` - 整批顺序处理
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{BatchItem, GlobalConfig, ItemId, ItemStatus, WordReplacement};
pub use orchestrator::{BatchOrchestrator, BatchRunStats};
pub use services::{ExportService, RemoteEditClient, StudioClient};
pub use store::{BatchStore, ConfigStore, StoreEvent, MAX_BATCH_SIZE};
pub use workflow::{ItemCtx, ItemFlow};
