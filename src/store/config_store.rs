//! 配置存储
//!
//! 持有会话内唯一的 `GlobalConfig`。处理中的编辑调用拿到的是调用时刻的快照，
//! 之后的修改只影响后续调用。

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::models::{GlobalConfig, WordReplacement};

/// 风格配置存储
#[derive(Debug, Default)]
pub struct ConfigStore {
    config: RwLock<GlobalConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用已有配置（例如从风格预设加载）创建
    pub fn with_config(config: GlobalConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// 当前配置的快照
    pub fn snapshot(&self) -> GlobalConfig {
        self.read().clone()
    }

    pub fn set_color_combination(&self, value: impl Into<String>) {
        self.write().color_combination = value.into();
    }

    pub fn set_text_color(&self, value: impl Into<String>) {
        self.write().text_color = value.into();
    }

    pub fn set_target_face_description(&self, value: impl Into<String>) {
        self.write().target_face_description = value.into();
    }

    /// 追加文字替换规则
    ///
    /// 去空白后任一字段为空则静默忽略，返回是否追加成功。
    pub fn add_replacement(&self, find: &str, replace: &str) -> bool {
        match WordReplacement::new(find, replace) {
            Some(rule) => {
                debug!("添加文字替换规则: {} -> {}", rule.find, rule.replace);
                self.write().word_replacements.push(rule);
                true
            }
            None => false,
        }
    }

    /// 删除指定位置的规则，越界时不做任何事
    pub fn remove_replacement(&self, index: usize) -> bool {
        let mut config = self.write();
        if index < config.word_replacements.len() {
            config.word_replacements.remove(index);
            true
        } else {
            false
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, GlobalConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GlobalConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_replacement_is_ignored() {
        let store = ConfigStore::new();
        assert!(!store.add_replacement("  ", "x"));
        assert!(!store.add_replacement("logo", "   "));
        assert!(store.snapshot().word_replacements.is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_empty_list() {
        let store = ConfigStore::new();
        assert!(store.add_replacement("logo", "FAN FC"));
        assert_eq!(store.snapshot().word_replacements.len(), 1);
        assert!(store.remove_replacement(0));
        assert!(store.snapshot().word_replacements.is_empty());
    }

    #[test]
    fn test_remove_shifts_and_out_of_range_is_noop() {
        let store = ConfigStore::new();
        store.add_replacement("a", "1");
        store.add_replacement("b", "2");
        store.add_replacement("c", "3");

        assert!(!store.remove_replacement(7));
        assert_eq!(store.snapshot().word_replacements.len(), 3);

        assert!(store.remove_replacement(1));
        let finds: Vec<String> = store.snapshot().word_replacements.into_iter().map(|r| r.find).collect();
        assert_eq!(finds, vec!["a", "c"]);
    }

    #[test]
    fn test_duplicates_and_identity_rules_allowed() {
        let store = ConfigStore::new();
        assert!(store.add_replacement("same", "same"));
        assert!(store.add_replacement("same", "same"));
        assert_eq!(store.snapshot().word_replacements.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_changes() {
        let store = ConfigStore::new();
        let before = store.snapshot();
        store.set_text_color("Neon Green");
        store.set_color_combination("Black & Gold");
        store.set_target_face_description("A veteran coach");

        assert_eq!(before.text_color, "Electric Blue");
        let after = store.snapshot();
        assert_eq!(after.text_color, "Neon Green");
        assert_eq!(after.color_combination, "Black & Gold");
        assert_eq!(after.target_face_description, "A veteran coach");
    }
}
