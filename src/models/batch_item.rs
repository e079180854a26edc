use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 条目 ID
///
/// 创建时生成，生命周期内不变，不会复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 条目状态
///
/// `Pending → Processing → {Completed | Error}`，终态可以重新进入 `Processing`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl ItemStatus {
    /// 界面上显示的状态标签
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Completed => "READY",
            ItemStatus::Processing => "WORKING",
            ItemStatus::Error => "ERROR",
            ItemStatus::Pending => "PENDING",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Completed | ItemStatus::Error)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Processing => "processing",
            ItemStatus::Completed => "completed",
            ItemStatus::Error => "error",
        };
        f.write_str(name)
    }
}

/// 批次中的一个工作单元：输入图片 + 描述，输出图片 + 改写后的描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub id: ItemId,
    /// 原图（data URL），设置后不再改变
    pub original_image: String,
    pub original_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_description: Option<String>,
    pub status: ItemStatus,
    /// 预留的单条目换脸提示，目前不参与处理
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_swap_prompt: Option<String>,
}

impl BatchItem {
    /// 由上传的图片创建新条目（描述为空，状态为 pending）
    pub fn new(original_image: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            original_image: original_image.into(),
            original_description: String::new(),
            edited_image: None,
            rewritten_description: None,
            status: ItemStatus::Pending,
            face_swap_prompt: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ItemStatus::Completed
    }
}
