use serde::Deserialize;
use std::path::Path;

use crate::error::{AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库 JSON（本地路径或 http(s) 地址）
    pub questions_source: String,
    /// 分类列表 JSON，可选
    pub categories_source: Option<String>,
    /// PDF 页眉/页脚中重复出现的比赛标题
    pub document_title: String,
    /// 逐字显示的间隔（毫秒）
    pub reveal_interval_ms: u64,
    /// 抢答倒计时秒数
    pub countdown_seconds: u32,
    /// 朗读语速
    pub speech_rate: f32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 随机抽题种子，不设置则使用系统随机源
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_source: "questions/mit_2024_round1.json".to_string(),
            categories_source: Some("questions/categories.json".to_string()),
            document_title: "MIT Science Bowl 2024".to_string(),
            reveal_interval_ms: 50,
            countdown_seconds: 5,
            speech_rate: 1.0,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            rng_seed: None,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（SCIENCE_BOWL_CONFIG）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("SCIENCE_BOWL_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::TomlParseFailed)?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        let default = self;
        Self {
            questions_source: std::env::var("QUESTIONS_SOURCE").unwrap_or(default.questions_source),
            categories_source: std::env::var("CATEGORIES_SOURCE").ok().or(default.categories_source),
            document_title: std::env::var("DOCUMENT_TITLE").unwrap_or(default.document_title),
            reveal_interval_ms: std::env::var("REVEAL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(default.reveal_interval_ms),
            countdown_seconds: std::env::var("COUNTDOWN_SECONDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.countdown_seconds),
            speech_rate: std::env::var("SPEECH_RATE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.speech_rate),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            rng_seed: std::env::var("RNG_SEED").ok().and_then(|v| v.parse().ok()).or(default.rng_seed),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.reveal_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reveal_interval_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.countdown_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "countdown_seconds".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            questions_source = "round2.json"
            countdown_seconds = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.questions_source, "round2.json");
        assert_eq!(config.countdown_seconds, 7);
        assert_eq!(config.reveal_interval_ms, 50);
        assert_eq!(config.document_title, "MIT Science Bowl 2024");
    }

    #[test]
    fn test_toml_rejects_zero_countdown() {
        let err = Config::from_toml_str("countdown_seconds = 0").unwrap_err();
        assert!(err.to_string().contains("countdown_seconds"));
    }

    #[test]
    fn test_toml_syntax_error() {
        assert!(Config::from_toml_str("countdown_seconds = ").is_err());
    }
}
