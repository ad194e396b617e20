// ==========================================
// Онтология ГРМ - 配置管理器
// ==========================================
// 职责: 配置加载（默认值 ← JSON 文件 ← 环境变量）与校验
// ==========================================

use crate::config::pipeline_config::{Locale, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// 环境变量键
// ==========================================
pub mod config_keys {
    // 界面语言
    pub const LOCALE: &str = "GRM_LOCALE";

    // 优先识别的根目录名
    pub const ROOT_DIR_NAME: &str = "GRM_ROOT_DIR_NAME";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: PipelineConfig,
}

impl ConfigManager {
    /// 使用默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 可选的 JSON 配置文件路径
    ///
    /// # 顺序
    /// 1. 默认值
    /// 2. JSON 文件（仅覆写出现的字段）
    /// 3. 环境变量（GRM_LOCALE / GRM_ROOT_DIR_NAME）
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::read_file(p)?,
            None => PipelineConfig::default(),
        };

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Self::validate(&config)?;

        info!(
            locale = config.locale.as_str(),
            root_dir_name = %config.layout.root_dir_name,
            "配置加载完成"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn into_config(self) -> PipelineConfig {
        self.config
    }

    fn read_file(path: &Path) -> Result<PipelineConfig, ConfigError> {
        debug!(path = %path.display(), "读取配置文件");
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写（lookup 便于测试注入）
    fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(config_keys::LOCALE).filter(|v| !v.trim().is_empty()) {
            config.locale = Locale(locale.trim().to_string());
        }
        if let Some(root) = lookup(config_keys::ROOT_DIR_NAME).filter(|v| !v.trim().is_empty()) {
            config.layout.root_dir_name = root.trim().to_string();
        }
    }

    /// 校验配置
    pub fn validate(config: &PipelineConfig) -> Result<(), ConfigError> {
        let required = [
            ("schema.schema_marker", &config.schema.schema_marker),
            ("schema.stop_marker", &config.schema.stop_marker),
            ("layout.template_file_keyword", &config.layout.template_file_keyword),
            ("layout.records_file_keyword", &config.layout.records_file_keyword),
            ("output.results_dir", &config.output.results_dir),
            ("output.reference_dir", &config.output.reference_dir),
            ("output.archive_file", &config.output.archive_file),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "不能为空".to_string(),
                });
            }
        }

        if config.schema.scan_rows == 0 {
            return Err(ConfigError::InvalidValue {
                key: "schema.scan_rows".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        if config
            .schema
            .excluded_labels
            .iter()
            .any(|label| label.trim().is_empty())
        {
            // 空标签与任何属性名都构成子串关系，会排除全部属性
            return Err(ConfigError::InvalidValue {
                key: "schema.excluded_labels".to_string(),
                message: "不能包含空字符串".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "output": {{ "archive_file": "out.zip" }}, "schema": {{ "scan_rows": 5 }} }}"#
        )
        .unwrap();

        let manager = ConfigManager::load(Some(file.path())).unwrap();
        assert_eq!(manager.config().output.archive_file, "out.zip");
        assert_eq!(manager.config().schema.scan_rows, 5);
        assert_eq!(manager.config().output.reference_dir, "Вспомогательные справочники");
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();

        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PipelineConfig::default();
        ConfigManager::apply_env_overrides(&mut config, |key| match key {
            config_keys::LOCALE => Some("en".to_string()),
            config_keys::ROOT_DIR_NAME => Some("  Онтология  ".to_string()),
            _ => None,
        });

        assert_eq!(config.locale.as_str(), "en");
        assert_eq!(config.layout.root_dir_name, "Онтология");
    }

    #[test]
    fn test_validate_rejects_zero_scan_rows() {
        let mut config = PipelineConfig::default();
        config.schema.scan_rows = 0;
        assert!(ConfigManager::validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_excluded_label() {
        let mut config = PipelineConfig::default();
        config.schema.excluded_labels.push("  ".to_string());
        assert!(ConfigManager::validate(&config).is_err());
    }
}
