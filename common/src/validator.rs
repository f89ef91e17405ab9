//! 内容検証（ファイル名キーワード＋乱数によるデモ用ヒューリスティック）
//!
//! 実際の画像認識は行わない。ファイル名に人物・動物・物体のキーワードが含まれれば不合格、
//! それ以外は一定確率で不合格を模擬する。作物キーワードは記録するだけで合格を強制しない。

use crate::config::AnalysisConfig;
use crate::types::{RejectionReason, UploadCandidate, ValidationVerdict};
use rand::Rng;

pub const HUMAN_KEYWORDS: &[&str] = &[
    "person", "people", "human", "face", "selfie", "portrait", "man", "woman", "boy", "girl",
];

pub const ANIMAL_KEYWORDS: &[&str] = &[
    "dog", "cat", "animal", "pet", "bird", "horse", "cow", "pig", "sheep",
];

pub const OBJECT_KEYWORDS: &[&str] = &[
    "car", "building", "house", "phone", "computer", "furniture", "tool", "machine",
];

pub const CROP_KEYWORDS: &[&str] = &[
    "plant", "leaf", "crop", "farm", "garden", "tomato", "potato", "corn", "wheat", "rice",
    "vegetable", "fruit",
];

/// ファイル名のキーワード判定結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordHits {
    pub human: bool,
    pub animal: bool,
    pub object: bool,
    pub crop: bool,
}

impl KeywordHits {
    /// 部分一致（大文字小文字を区別しない）
    pub fn scan(file_name: &str) -> Self {
        let name = file_name.to_lowercase();
        let any = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

        Self {
            human: any(HUMAN_KEYWORDS),
            animal: any(ANIMAL_KEYWORDS),
            object: any(OBJECT_KEYWORDS),
            crop: any(CROP_KEYWORDS),
        }
    }

    /// キーワードによる即時不合格（human > animal > object の優先順）
    pub fn forced_rejection(&self) -> Option<RejectionReason> {
        if self.human {
            Some(RejectionReason::Human)
        } else if self.animal {
            Some(RejectionReason::Animal)
        } else if self.object {
            Some(RejectionReason::Object)
        } else {
            None
        }
    }
}

/// キーワード＋乱数のヒューリスティック検証器
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHeuristic {
    config: AnalysisConfig,
}

impl KeywordHeuristic {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn validate<R: Rng + ?Sized>(&self, candidate: &UploadCandidate, rng: &mut R) -> ValidationVerdict {
        self.validate_name(candidate.name(), rng)
    }

    /// ファイル名だけで判定する
    ///
    /// キーワードに該当した場合は乱数を消費しない。
    pub fn validate_name<R: Rng + ?Sized>(&self, file_name: &str, rng: &mut R) -> ValidationVerdict {
        let hits = KeywordHits::scan(file_name);
        tracing::debug!(file_name, ?hits, "filename keyword scan");

        if let Some(reason) = hits.forced_rejection() {
            tracing::debug!(?reason, "rejected by filename keyword");
            return ValidationVerdict::rejected(reason);
        }

        let draw: f64 = rng.gen();
        if draw < self.config.rejection_probability {
            let kind: f64 = rng.gen();
            let reason = self.reason_for_draw(kind);
            tracing::debug!(draw, kind, ?reason, "simulated rejection");
            return ValidationVerdict::rejected(reason);
        }

        tracing::debug!(draw, "validated as crop content");
        ValidationVerdict::accepted()
    }

    /// 2回目の抽選値を不合格理由に対応付ける
    pub fn reason_for_draw(&self, kind: f64) -> RejectionReason {
        if kind < self.config.human_upper {
            RejectionReason::Human
        } else if kind < self.config.animal_upper {
            RejectionReason::Animal
        } else {
            RejectionReason::Object
        }
    }
}

/// 判定から利用者向けメッセージへの対応（状態を持たない）
pub fn rejection_message(verdict: &ValidationVerdict) -> &'static str {
    match verdict.rejection_reason() {
        Some(RejectionReason::Human) => "Human detected in image. Please upload a crop image only.",
        Some(RejectionReason::Animal) => "Animal detected in image. Please upload a crop image only.",
        Some(RejectionReason::Object) => {
            "Non-agricultural object detected. Please upload a crop image only."
        }
        Some(RejectionReason::NotDetectable) | None => {
            "Not Detectable – Please upload a valid crop image."
        }
    }
}
