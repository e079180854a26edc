use serde::{Deserialize, Serialize};

/// 文字替换规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordReplacement {
    pub find: String,
    pub replace: String,
}

impl WordReplacement {
    /// 去除首尾空白后构造规则；任一字段为空时返回 None
    pub fn new(find: &str, replace: &str) -> Option<Self> {
        let find = find.trim();
        let replace = replace.trim();
        if find.is_empty() || replace.is_empty() {
            return None;
        }
        Some(Self {
            find: find.to_string(),
            replace: replace.to_string(),
        })
    }
}

/// 全局风格指令
///
/// 会话内唯一的一份，所有条目共享。字段为自由文本，不做语义校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub color_combination: String,
    pub text_color: String,
    pub target_face_description: String,
    pub word_replacements: Vec<WordReplacement>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            color_combination: "Modern Blue & White".to_string(),
            text_color: "Electric Blue".to_string(),
            target_face_description: "A professional young athlete".to_string(),
            word_replacements: Vec::new(),
        }
    }
}
