use crate::error::{AppError, FileError};
use crate::models::global_config::{GlobalConfig, WordReplacement};
use anyhow::Result;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载风格预设
///
/// 文件不存在时使用默认风格；文字替换规则同样经过去空白校验，空规则会被丢弃。
pub async fn load_style_preset(style_file_path: &Path) -> Result<GlobalConfig> {
    if !fs::try_exists(style_file_path).await.unwrap_or(false) {
        tracing::info!(
            "未找到风格预设 {}，使用默认风格",
            style_file_path.display()
        );
        return Ok(GlobalConfig::default());
    }

    let path = style_file_path.display().to_string();
    let content = fs::read_to_string(style_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path, e))?;

    let raw: GlobalConfig =
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path.clone(),
            source,
        })?;

    let total_rules = raw.word_replacements.len();
    let word_replacements: Vec<WordReplacement> = raw
        .word_replacements
        .iter()
        .filter_map(|r| WordReplacement::new(&r.find, &r.replace))
        .collect();

    if word_replacements.len() < total_rules {
        tracing::warn!(
            "风格预设中有 {} 条空的文字替换规则被忽略",
            total_rules - word_replacements.len()
        );
    }

    Ok(GlobalConfig {
        word_replacements,
        ..raw
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_style_preset(&dir.path().join("style.toml"))
            .await
            .unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[tokio::test]
    async fn test_load_preset_drops_blank_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.toml");
        std::fs::write(
            &path,
            r#"
color_combination = "Neon Purple & Silver"
target_face_description = "A young male gamer"

[[word_replacements]]
find = " logo "
replace = "FAN FC"

[[word_replacements]]
find = "   "
replace = "x"
"#,
        )
        .unwrap();

        let config = load_style_preset(&path).await.unwrap();
        assert_eq!(config.color_combination, "Neon Purple & Silver");
        assert_eq!(config.text_color, "Electric Blue");
        assert_eq!(
            config.word_replacements,
            vec![WordReplacement {
                find: "logo".to_string(),
                replace: "FAN FC".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.toml");
        std::fs::write(&path, "text_color = [").unwrap();
        let err = load_style_preset(&path).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FileError>(),
            Some(FileError::TomlParseFailed { .. })
        ));
    }
}
