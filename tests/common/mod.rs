//! 测试用的远程客户端替身
#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use batch_studio::error::{ApiError, AppResult};
use batch_studio::{BatchStore, GlobalConfig, ItemStatus, RemoteEditClient};

type EditHook = Box<dyn Fn(&str) + Send + Sync>;

/// 可编排的远程客户端
///
/// - 按原图内容指定哪些编辑调用失败
/// - 记录在途调用数的峰值、收到的配置快照
/// - 编辑调用途中可以执行钩子（例如移除条目、修改配置）
#[derive(Default)]
pub struct ScriptedClient {
    failing_images: HashSet<String>,
    failing_rewrite: bool,
    delay: Duration,
    observed_store: Option<Arc<BatchStore>>,
    hook: Option<EditHook>,

    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub max_processing: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub rewrite_calls: AtomicUsize,
    pub seen_configs: Mutex<Vec<GlobalConfig>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_edit(mut self, image: &str) -> Self {
        self.failing_images.insert(image.to_string());
        self
    }

    pub fn failing_rewrite(mut self) -> Self {
        self.failing_rewrite = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 编辑调用途中统计存储里 processing 条目的数量
    pub fn observing(mut self, store: Arc<BatchStore>) -> Self {
        self.observed_store = Some(store);
        self
    }

    pub fn on_edit(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteEditClient for ScriptedClient {
    async fn rewrite(&self, description: &str) -> String {
        self.enter();
        let n = self.rewrite_calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.leave();

        if self.failing_rewrite {
            // 与真实服务一致：失败时原样返回
            description.to_string()
        } else {
            format!("{} (rewrite #{})", description, n)
        }
    }

    async fn edit(&self, image: &str, config: &GlobalConfig) -> AppResult<String> {
        self.enter();
        let n = self.edit_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.seen_configs.lock().unwrap().push(config.clone());

        if let Some(store) = &self.observed_store {
            let processing = store.count_by_status(ItemStatus::Processing);
            self.max_processing.fetch_max(processing, Ordering::SeqCst);
        }
        if let Some(hook) = &self.hook {
            hook(image);
        }

        tokio::time::sleep(self.delay).await;
        self.leave();

        if self.failing_images.contains(image) {
            return Err(ApiError::EmptyResponse {
                endpoint: "scripted".to_string(),
            }
            .into());
        }

        let payload = format!("edited {} #{}", image, n);
        Ok(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(payload)
        ))
    }
}

/// 生成 n 张测试图片
pub fn images(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("data:image/png;base64,img{}", i)).collect()
}
