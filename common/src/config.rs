//! デモ分類器の設定

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 検証ヒューリスティックのパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// キーワードに該当しない画像を不合格にする確率
    pub rejection_probability: f64,
    /// 2回目の抽選で human とする上限（[0, human_upper)）
    pub human_upper: f64,
    /// 2回目の抽選で animal とする上限（[human_upper, animal_upper)）、残りは object
    pub animal_upper: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rejection_probability: 0.3,
            human_upper: 0.4,
            animal_upper: 0.7,
        }
    }
}

impl AnalysisConfig {
    pub fn with_rejection_probability(mut self, probability: f64) -> Self {
        self.rejection_probability = probability;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.rejection_probability) {
            return Err(Error::Config(format!(
                "rejection_probability must be within 0.0-1.0: {}",
                self.rejection_probability
            )));
        }
        if !(0.0 <= self.human_upper && self.human_upper <= self.animal_upper && self.animal_upper <= 1.0) {
            return Err(Error::Config(format!(
                "reason split must satisfy 0 <= human ({}) <= animal ({}) <= 1",
                self.human_upper, self.animal_upper
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert_eq!(config.rejection_probability, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_probability() {
        let config = AnalysisConfig::default().with_rejection_probability(1.5);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_reason_split_order() {
        let config = AnalysisConfig {
            human_upper: 0.8,
            animal_upper: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"rejectionProbability": 0.1}"#).expect("デシリアライズ失敗");
        assert_eq!(config.rejection_probability, 0.1);
        assert_eq!(config.human_upper, 0.4);
        assert_eq!(config.animal_upper, 0.7);
    }
}
