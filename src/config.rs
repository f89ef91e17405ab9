use crate::error::{CropDetectError, Result};
use crop_detect_common::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 環境変数で不合格確率を上書きする
pub const REJECTION_PROBABILITY_ENV: &str = "CROP_DETECT_REJECTION_PROBABILITY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// キーワードに該当しない画像を不合格にする確率
    pub rejection_probability: f64,
    /// 推論待ちの模擬遅延（ミリ秒）
    pub analysis_delay_ms: u64,
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rejection_probability: AnalysisConfig::default().rejection_probability,
            analysis_delay_ms: 3000,
            server_addr: "127.0.0.1:8080".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        config.apply_rejection_override(std::env::var(REJECTION_PROBABILITY_ENV).ok().as_deref())?;

        config.analysis_config().validate()?;
        Ok(config)
    }

    fn apply_rejection_override(&mut self, value: Option<&str>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };
        self.rejection_probability = value.trim().parse().map_err(|_| {
            CropDetectError::Config(format!("{}が数値ではありません: {}", REJECTION_PROBABILITY_ENV, value))
        })?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CropDetectError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("crop-detect").join("config.json"))
    }

    /// 分類器に渡す設定
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::default().with_rejection_probability(self.rejection_probability)
    }

    pub fn set_rejection_probability(&mut self, probability: f64) -> Result<()> {
        AnalysisConfig::default()
            .with_rejection_probability(probability)
            .validate()?;
        self.rejection_probability = probability;
        self.save()
    }

    pub fn set_analysis_delay_ms(&mut self, delay_ms: u64) -> Result<()> {
        self.analysis_delay_ms = delay_ms;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rejection_probability, 0.3);
        assert_eq!(config.analysis_delay_ms, 3000);
        assert!(config.analysis_config().validate().is_ok());
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"analysis_delay_ms": 0}"#).expect("デシリアライズ失敗");
        assert_eq!(config.analysis_delay_ms, 0);
        assert_eq!(config.server_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_rejection_override() {
        let mut config = Config::default();
        config.apply_rejection_override(None).unwrap();
        assert_eq!(config.rejection_probability, 0.3);

        config.apply_rejection_override(Some(" 0.75 ")).unwrap();
        assert_eq!(config.rejection_probability, 0.75);

        let err = config.apply_rejection_override(Some("often")).unwrap_err();
        assert!(matches!(err, CropDetectError::Config(_)));
        assert_eq!(config.rejection_probability, 0.75);
    }

    #[test]
    fn test_config_path() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("crop-detect/config.json"));
        }
    }
}
