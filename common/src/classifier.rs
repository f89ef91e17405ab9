//! 分類器インターフェース
//!
//! ワークフロー（状態遷移）から「検証」と「結果選択」を切り離す。
//! 現状の実装はデモ用の乱数分類器のみ。本物の推論バックエンドはここに差し込む。

use crate::catalog;
use crate::config::AnalysisConfig;
use crate::types::{DiagnosisRecord, UploadCandidate, ValidationVerdict};
use crate::validator::KeywordHeuristic;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Classifier {
    /// 画像内容の検証
    fn validate(&mut self, candidate: &UploadCandidate) -> ValidationVerdict;

    /// 合格時の診断レコード選択
    fn select<'a>(&mut self, catalog: &'a [DiagnosisRecord]) -> Option<&'a DiagnosisRecord>;
}

/// デモ用分類器（キーワード＋乱数、カタログから一様選択）
///
/// 検証と選択で同じ乱数源を共有する。
#[derive(Debug, Clone)]
pub struct DemoClassifier<R = StdRng> {
    heuristic: KeywordHeuristic,
    rng: R,
}

impl DemoClassifier<StdRng> {
    /// シード固定（テスト・再現用）
    pub fn from_seed(seed: u64, config: AnalysisConfig) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: AnalysisConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> DemoClassifier<R> {
    pub fn with_rng(config: AnalysisConfig, rng: R) -> Self {
        Self {
            heuristic: KeywordHeuristic::new(config),
            rng,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.heuristic.config()
    }
}

impl<R: Rng> Classifier for DemoClassifier<R> {
    fn validate(&mut self, candidate: &UploadCandidate) -> ValidationVerdict {
        self.heuristic.validate(candidate, &mut self.rng)
    }

    fn select<'a>(&mut self, catalog: &'a [DiagnosisRecord]) -> Option<&'a DiagnosisRecord> {
        catalog::select(catalog, &mut self.rng)
    }
}
