//! 图片编辑服务 - 业务能力层
//!
//! 通过 Gemini `generateContent` 接口编辑单张图片。请求里带上原图（inline data）
//! 和由风格指令拼成的提示词，响应中第一段 inline data 即为编辑结果。

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::GlobalConfig;
use crate::utils::data_url::{split_data_url, DEFAULT_IMAGE_MIME};

/// 密钥放在请求头里，URL 中不出现密钥
const API_KEY_HEADER: &str = "x-goog-api-key";

/// 图片编辑服务
pub struct ImageEditService {
    client: Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
}

impl ImageEditService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.llm_api_key.clone(),
            api_base_url: config.image_api_base_url.trim_end_matches('/').to_string(),
            model_name: config.image_model_name.clone(),
        }
    }

    /// 编辑图片
    ///
    /// # 参数
    /// - `image`: 原图 data URL
    /// - `config`: 调用时刻的风格指令快照
    ///
    /// # 返回
    /// 编辑后的图片 data URL；远程出错或未返回图片时返回错误
    pub async fn edit_image(&self, image: &str, config: &GlobalConfig) -> AppResult<String> {
        let endpoint = format!("{}:generateContent", self.model_name);
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model_name
        );

        let (mime_type, data) = split_data_url(image);
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart {
                        inline_data: Some(GeminiInlineData {
                            mime_type: mime_type.to_string(),
                            data: data.to_string(),
                        }),
                        text: None,
                    },
                    GeminiPart {
                        inline_data: None,
                        text: Some(build_edit_prompt(config)),
                    },
                ],
            }],
        };

        debug!("调用图片编辑 API，模型: {}", self.model_name);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("图片编辑请求发送失败: {}", e);
                AppError::api_request_failed(endpoint.clone(), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("图片编辑 API 返回错误状态 {}: {}", status, message);
            return Err(ApiError::BadResponse {
                endpoint,
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;
        let gemini_response: GeminiResponse = serde_json::from_str(&body)?;

        extract_image(&gemini_response).ok_or_else(|| {
            error!("图片编辑 API 未返回图片数据");
            ApiError::EmptyResponse { endpoint }.into()
        })
    }
}

/// 根据风格指令构建编辑提示词
pub fn build_edit_prompt(config: &GlobalConfig) -> String {
    let mut directives = vec![
        format!(
            "If there is a person in the image, modify their appearance or \"swap\" their face/look to match this description: \"{}\".",
            config.target_face_description
        ),
        "Identify any logos in the image and replace them with the text \"fan fc\" in a clean, professional font.".to_string(),
        format!(
            "Identify all text in the image. Change its color to {}.",
            config.text_color
        ),
        format!(
            "Ensure the overall color theme of the image matches a {} palette.",
            config.color_combination
        ),
    ];

    if !config.word_replacements.is_empty() {
        let replacements: Vec<String> = config
            .word_replacements
            .iter()
            .map(|r| format!("Find \"{}\" and change it to \"{}\"", r.find, r.replace))
            .collect();
        directives.push(format!(
            "Perform the following text replacements: {}. Ensure the new text uses the same font style and size as the original.",
            replacements.join(", ")
        ));
    }

    directives.push("Maintain high quality and the original composition structure.".to_string());

    let numbered: Vec<String> = directives
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {}", i + 1, d))
        .collect();

    format!(
        "Please edit this image with these exact requirements:\n{}",
        numbered.join("\n")
    )
}

/// 取响应中第一段图片数据，包装为 data URL
fn extract_image(response: &GeminiResponse) -> Option<String> {
    let candidate = response.candidates.first()?;
    candidate
        .content
        .as_ref()?
        .parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
        .map(|inline| {
            let mime = if inline.mime_type.is_empty() {
                DEFAULT_IMAGE_MIME
            } else {
                inline.mime_type.as_str()
            };
            format!("data:{};base64,{}", mime, inline.data)
        })
}

// ========== Gemini 请求/响应结构 ==========

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordReplacement;

    #[test]
    fn test_prompt_without_replacements() {
        let prompt = build_edit_prompt(&GlobalConfig::default());
        assert!(prompt.contains("\"A professional young athlete\""));
        assert!(prompt.contains("Change its color to Electric Blue."));
        assert!(prompt.contains("matches a Modern Blue & White palette"));
        assert!(prompt.contains("\"fan fc\""));
        assert!(!prompt.contains("text replacements"));
        assert!(prompt.contains("5. Maintain high quality"));
    }

    #[test]
    fn test_prompt_lists_replacements_in_order() {
        let config = GlobalConfig {
            word_replacements: vec![
                WordReplacement::new("logo", "FAN FC").unwrap(),
                WordReplacement::new("2023", "2024").unwrap(),
            ],
            ..GlobalConfig::default()
        };
        let prompt = build_edit_prompt(&config);
        assert!(prompt.contains(
            "5. Perform the following text replacements: Find \"logo\" and change it to \"FAN FC\", Find \"2023\" and change it to \"2024\"."
        ));
        assert!(prompt.contains("6. Maintain high quality"));
    }

    #[test]
    fn test_extract_image_skips_text_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"here you go"},
                {"inlineData":{"mimeType":"image/png","data":"QUJD"}}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_image(&response).as_deref(),
            Some("data:image/png;base64,QUJD")
        );
    }

    #[test]
    fn test_extract_image_none_when_text_only() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"I cannot edit this"}]}}]}"#,
        )
        .unwrap();
        assert!(extract_image(&response).is_none());

        let empty: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_image(&empty).is_none());
    }

    #[test]
    fn test_request_serializes_inline_data() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    inline_data: Some(GeminiInlineData {
                        mime_type: "image/png".to_string(),
                        data: "QUJD".to_string(),
                    }),
                    text: None,
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents":[{"parts":[{"inlineData":{"mimeType":"image/png","data":"QUJD"}}]}]})
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_propagates_error() {
        let config = Config {
            llm_api_key: "test-key".to_string(),
            image_api_base_url: "http://127.0.0.1:9/v1beta".to_string(),
            ..Config::default()
        };
        let service = ImageEditService::new(&config);
        let result = service
            .edit_image("data:image/png;base64,QUJD", &GlobalConfig::default())
            .await;
        assert!(matches!(
            result,
            Err(AppError::Api(ApiError::RequestFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_request_error_does_not_leak_api_key() {
        let config = Config {
            llm_api_key: "SECRET-KEY-123".to_string(),
            image_api_base_url: "http://127.0.0.1:9/v1beta".to_string(),
            ..Config::default()
        };
        let service = ImageEditService::new(&config);
        let err = service
            .edit_image("data:image/png;base64,QUJD", &GlobalConfig::default())
            .await
            .unwrap_err();

        let text = format!("{} {:?}", err, err);
        assert!(text.contains("generateContent"));
        assert!(!text.contains("SECRET-KEY-123"));
    }
}
