//! 解析ワークフローの型定義
//!
//! CLI・HTTP・Web(WASM)で共有される型:
//! - FileDescriptor / UploadCandidate: アップロード受付の入出力
//! - ValidationVerdict: 内容検証の判定
//! - DiagnosisRecord: 固定カタログの診断レコード
//! - AnalysisOutcome: 1回の解析の最終結果

use serde::Serialize;

/// 受付前のファイル情報（ブラウザの File / ディスク上のファイル）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub mime_type: String,
    pub byte_size: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, byte_size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            byte_size,
        }
    }
}

/// 受付を通過したファイル
///
/// `intake::submit` 以外からは生成できない。形式・サイズ制約は生成時点で保証済み。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    name: String,
    mime_type: String,
    byte_size: u64,
    preview_uri: String,
}

impl UploadCandidate {
    pub(crate) fn new(file: &FileDescriptor, preview_uri: String) -> Self {
        Self {
            name: file.name.clone(),
            mime_type: file.mime_type.to_ascii_lowercase(),
            byte_size: file.byte_size,
            preview_uri,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    /// 表示用URI（data URI または object URL）
    pub fn preview_uri(&self) -> &str {
        &self.preview_uri
    }
}

/// 不合格理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionReason {
    Human,
    Animal,
    Object,
    /// 理由フラグなしの不合格（検出不能）
    NotDetectable,
}

/// 内容検証の判定
///
/// 理由フラグは高々1つだけ立つ。コンストラクタ経由でのみ生成する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    is_valid_crop: bool,
    contains_human: bool,
    contains_animal: bool,
    contains_object: bool,
}

impl ValidationVerdict {
    pub fn accepted() -> Self {
        Self {
            is_valid_crop: true,
            contains_human: false,
            contains_animal: false,
            contains_object: false,
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            is_valid_crop: false,
            contains_human: reason == RejectionReason::Human,
            contains_animal: reason == RejectionReason::Animal,
            contains_object: reason == RejectionReason::Object,
        }
    }

    pub fn is_valid_crop(&self) -> bool {
        self.is_valid_crop
    }

    pub fn contains_human(&self) -> bool {
        self.contains_human
    }

    pub fn contains_animal(&self) -> bool {
        self.contains_animal
    }

    pub fn contains_object(&self) -> bool {
        self.contains_object
    }

    /// 不合格理由（合格なら None）
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        if self.is_valid_crop {
            None
        } else if self.contains_human {
            Some(RejectionReason::Human)
        } else if self.contains_animal {
            Some(RejectionReason::Animal)
        } else if self.contains_object {
            Some(RejectionReason::Object)
        } else {
            Some(RejectionReason::NotDetectable)
        }
    }
}

/// 診断レコード（静的カタログの1件）
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    pub crop_name: &'static str,
    pub disease_label: &'static str,
    pub confidence_percent: u8,
    pub is_healthy: bool,
    pub symptoms: &'static [&'static str],
    pub treatment_steps: &'static [&'static str],
    pub prevention_tips: &'static [&'static str],
}

impl DiagnosisRecord {
    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_percent(self.confidence_percent)
    }
}

/// 信頼度の区分（結果表示の色分けに使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceTier {
    /// 90%以上
    High,
    /// 70%以上
    Moderate,
    Low,
}

impl ConfidenceTier {
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 90 {
            ConfidenceTier::High
        } else if percent >= 70 {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Moderate => "moderate",
            ConfidenceTier::Low => "low",
        }
    }
}

/// 1回の解析の最終結果
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// 検証器が不合格とした
    Rejected(ValidationVerdict),
    /// カタログから診断レコードを選択した
    Diagnosed(&'static DiagnosisRecord),
    /// ファイル読込失敗など想定外のエラー
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_accepted_has_no_flags() {
        let verdict = ValidationVerdict::accepted();
        assert!(verdict.is_valid_crop());
        assert!(!verdict.contains_human());
        assert!(!verdict.contains_animal());
        assert!(!verdict.contains_object());
        assert_eq!(verdict.rejection_reason(), None);
    }

    #[test]
    fn test_verdict_rejected_sets_single_flag() {
        for reason in [
            RejectionReason::Human,
            RejectionReason::Animal,
            RejectionReason::Object,
            RejectionReason::NotDetectable,
        ] {
            let verdict = ValidationVerdict::rejected(reason);
            let flags = [
                verdict.contains_human(),
                verdict.contains_animal(),
                verdict.contains_object(),
            ];
            assert!(!verdict.is_valid_crop());
            assert!(flags.iter().filter(|&&f| f).count() <= 1);
            assert_eq!(verdict.rejection_reason(), Some(reason));
        }
    }

    #[test]
    fn test_verdict_serialize_camel_case() {
        let json = serde_json::to_string(&ValidationVerdict::rejected(RejectionReason::Animal))
            .expect("シリアライズ失敗");
        assert!(json.contains("\"isValidCrop\":false"));
        assert!(json.contains("\"containsAnimal\":true"));
        assert!(json.contains("\"containsHuman\":false"));
    }

    #[test]
    fn test_confidence_tier_boundaries() {
        assert_eq!(ConfidenceTier::from_percent(100), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(90), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(89), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(70), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(69), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_percent(0), ConfidenceTier::Low);
    }

    #[test]
    fn test_candidate_normalizes_mime_type() {
        let file = FileDescriptor::new("Leaf.PNG", "IMAGE/PNG", 10);
        let candidate = UploadCandidate::new(&file, "data:".into());
        assert_eq!(candidate.name(), "Leaf.PNG");
        assert_eq!(candidate.mime_type(), "image/png");
        assert_eq!(candidate.byte_size(), 10);
    }
}
