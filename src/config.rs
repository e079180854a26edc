use crate::error::ConfigError;

/// 程序配置
///
/// 只包含运行参数和远程服务参数；风格指令（`GlobalConfig`）由 `ConfigStore` 单独持有。
#[derive(Clone, Debug)]
pub struct Config {
    // --- 文本改写（OpenAI 兼容接口）---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub text_model_name: String,
    // --- 图片编辑（Gemini generateContent）---
    pub image_api_base_url: String,
    pub image_model_name: String,
    // --- 运行参数 ---
    /// 待上传图片所在目录
    pub input_folder: String,
    /// 导出目录
    pub output_folder: String,
    /// 风格预设 TOML 文件
    pub style_file: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 批量下载时每个文件之间的间隔（毫秒）
    pub download_stagger_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            text_model_name: "gemini-3-flash-preview".to_string(),
            image_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            image_model_name: "gemini-2.5-flash-image".to_string(),
            input_folder: "input_images".to_string(),
            output_folder: "output".to_string(),
            style_file: "style.toml".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
            download_stagger_ms: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            text_model_name: std::env::var("TEXT_MODEL_NAME").unwrap_or(default.text_model_name),
            image_api_base_url: std::env::var("IMAGE_API_BASE_URL").unwrap_or(default.image_api_base_url),
            image_model_name: std::env::var("IMAGE_MODEL_NAME").unwrap_or(default.image_model_name),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            style_file: std::env::var("STYLE_FILE").unwrap_or(default.style_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            download_stagger_ms: std::env::var("DOWNLOAD_STAGGER_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.download_stagger_ms),
        }
    }

    /// 校验必需的配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_KEY".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_requires_api_key() {
        let config = Config::default();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_KEY".to_string()
            })
        );

        let config = Config {
            llm_api_key: "key".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_stagger_matches_browser_throttle() {
        assert_eq!(Config::default().download_stagger_ms, 300);
    }
}
