//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动整个批次的处理。
//!
//! ## 核心功能
//!
//! 1. **单条处理**：委托 `item_processor` 处理单个条目
//! 2. **顺序处理**：整批处理时逐个等待，上一个条目的两个调用都结束后才开始下一个，
//!    同一时刻最多只有一个条目处于 processing，最多两个远程调用在途
//! 3. **跳过已完成**：整批重跑不会重新处理已完成的条目
//! 4. **失败隔离**：单个条目失败不会中断整批
//! 5. **全局标志**：处理期间置位 `processing_all`，无论成败结束后清除

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{ItemId, ItemStatus};
use crate::orchestrator::item_processor;
use crate::services::RemoteEditClient;
use crate::store::{BatchStore, ConfigStore};
use crate::workflow::ItemFlow;

/// 一次整批处理的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchRunStats {
    /// 开始时批次中的条目数
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    /// 已完成或已被移除而跳过的条目
    pub skipped: usize,
}

/// 批量编排器
pub struct BatchOrchestrator {
    store: Arc<BatchStore>,
    config_store: Arc<ConfigStore>,
    flow: ItemFlow,
    processing_all: AtomicBool,
}

impl BatchOrchestrator {
    pub fn new(
        store: Arc<BatchStore>,
        config_store: Arc<ConfigStore>,
        client: Arc<dyn RemoteEditClient>,
    ) -> Self {
        Self {
            store,
            config_store,
            flow: ItemFlow::new(client),
            processing_all: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<BatchStore> {
        &self.store
    }

    pub fn config_store(&self) -> &Arc<ConfigStore> {
        &self.config_store
    }

    /// 是否正在整批处理
    pub fn is_processing_all(&self) -> bool {
        self.processing_all.load(Ordering::SeqCst)
    }

    /// 处理单个条目（也用于重新处理已完成或失败的条目）
    pub async fn process_item(&self, id: ItemId) -> Option<ItemStatus> {
        item_processor::process_item(&self.store, &self.config_store, &self.flow, id).await
    }

    /// 顺序处理批次中所有未完成的条目
    ///
    /// 开始时记录条目列表，运行期间新加入的条目不在本轮处理范围内。
    /// 已有一轮整批处理在进行时直接返回 None。
    pub async fn process_all(&self) -> Option<BatchRunStats> {
        if self
            .processing_all
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("⚠️ 已有整批处理在进行中，忽略本次请求");
            return None;
        }
        let _guard = ProcessingAllGuard(&self.processing_all);

        let ids = self.store.ids();
        let mut stats = BatchRunStats {
            total: ids.len(),
            ..Default::default()
        };
        log_run_start(stats.total);

        for id in ids {
            // 每次都重新读取当前状态，条目可能已被移除或被单独处理过
            let current = self.store.get(id).map(|item| item.status);
            match current {
                None | Some(ItemStatus::Completed) => {
                    stats.skipped += 1;
                    continue;
                }
                Some(_) => {}
            }

            match self.process_item(id).await {
                Some(ItemStatus::Completed) => stats.completed += 1,
                Some(_) => stats.failed += 1,
                None => stats.skipped += 1,
            }
        }

        log_run_complete(&stats);
        Some(stats)
    }
}

/// 离开作用域时清除整批处理标志
struct ProcessingAllGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingAllGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ========== 日志辅助函数 ==========

fn log_run_start(total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始整批处理，共 {} 张图片（顺序处理）", total);
    info!("{}", "=".repeat(60));
}

fn log_run_complete(stats: &BatchRunStats) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 整批处理结束: 成功 {} / 失败 {} / 跳过 {} / 共 {}",
        stats.completed, stats.failed, stats.skipped, stats.total
    );
    info!("{}", "─".repeat(60));
}
