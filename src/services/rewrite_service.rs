//! 描述改写服务 - 业务能力层
//!
//! 只负责"改写一段描述"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;

/// 描述为空时的固定返回值
pub const EMPTY_DESCRIPTION_FALLBACK: &str = "No description provided.";

/// 描述改写服务
///
/// 职责：
/// - 调用文本模型改写单条描述
/// - 远程失败时降级为返回原文
/// - 不出现 BatchItem / 状态
pub struct RewriteService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl RewriteService {
    /// 创建新的改写服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.text_model_name.clone(),
        }
    }

    /// 改写描述，永不返回错误
    ///
    /// - 空描述直接返回 `EMPTY_DESCRIPTION_FALLBACK`，不发请求
    /// - 远程失败或返回空内容时返回原文
    pub async fn rewrite_description(&self, description: &str) -> String {
        if description.is_empty() {
            return EMPTY_DESCRIPTION_FALLBACK.to_string();
        }

        let prompt = build_rewrite_prompt(description);
        match self.send_to_llm(&prompt).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                warn!("改写返回空内容，保留原描述");
                description.to_string()
            }
            Err(e) => {
                warn!("⚠️ 改写描述失败，保留原描述: {}", e);
                description.to_string()
            }
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(&self, user_message: &str) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        let messages = vec![ChatCompletionRequestMessage::User(user_msg)];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}

/// 构建改写提示词
pub fn build_rewrite_prompt(description: &str) -> String {
    format!(
        "Rewrite the following image description to be more creative and professional for a social media post. Keep it under 20 words.\n\nOriginal: {}",
        description
    )
}
