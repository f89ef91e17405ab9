//! 診断カタログ（固定データ）と結果選択
//!
//! 実際のAIバックエンドの代わりに、固定レコードから一様に1件を選ぶ。

use crate::types::DiagnosisRecord;
use rand::Rng;

/// 解析結果として選ばれる診断レコード
pub static DIAGNOSIS_CATALOG: [DiagnosisRecord; 3] = [
    DiagnosisRecord {
        crop_name: "Tomato",
        disease_label: "Healthy",
        confidence_percent: 94,
        is_healthy: true,
        symptoms: &[],
        treatment_steps: &[],
        prevention_tips: &[
            "Maintain proper soil drainage",
            "Ensure adequate spacing between plants",
            "Regular watering schedule",
            "Monitor for early signs of disease",
        ],
    },
    DiagnosisRecord {
        crop_name: "Potato",
        disease_label: "Late Blight",
        confidence_percent: 87,
        is_healthy: false,
        symptoms: &[
            "Dark brown or black lesions on leaves",
            "White fuzzy growth on leaf undersides",
            "Rapid leaf yellowing and death",
            "Dark lesions on stems and tubers",
        ],
        treatment_steps: &[
            "Remove and destroy affected plant parts immediately",
            "Apply copper-based fungicide spray",
            "Improve air circulation around plants",
            "Avoid overhead watering",
            "Consider resistant varieties for future planting",
        ],
        prevention_tips: &[
            "Plant in well-draining soil",
            "Avoid watering leaves directly",
            "Maintain good air circulation",
            "Regular crop rotation",
        ],
    },
    DiagnosisRecord {
        crop_name: "Corn",
        disease_label: "Northern Corn Leaf Blight",
        confidence_percent: 91,
        is_healthy: false,
        symptoms: &[
            "Cigar-shaped gray-green lesions",
            "Lesions turning tan with dark borders",
            "Leaf yellowing and premature death",
            "Reduced kernel development",
        ],
        treatment_steps: &[
            "Apply fungicide at early disease stages",
            "Remove infected plant debris",
            "Use resistant corn varieties",
            "Implement crop rotation practices",
        ],
        prevention_tips: &[
            "Choose resistant varieties",
            "Practice crop rotation",
            "Manage crop residue properly",
            "Monitor weather conditions",
        ],
    },
];

/// トップページの検出例（表示専用、選択対象ではない）
pub static SAMPLE_DETECTIONS: [DiagnosisRecord; 5] = [
    DiagnosisRecord {
        crop_name: "Tomato",
        disease_label: "Late Blight",
        confidence_percent: 94,
        is_healthy: false,
        symptoms: &["Dark lesions on leaves, white fuzzy growth"],
        treatment_steps: &[],
        prevention_tips: &[],
    },
    DiagnosisRecord {
        crop_name: "Potato",
        disease_label: "Healthy",
        confidence_percent: 97,
        is_healthy: true,
        symptoms: &["No visible symptoms detected"],
        treatment_steps: &[],
        prevention_tips: &[],
    },
    DiagnosisRecord {
        crop_name: "Corn",
        disease_label: "Northern Leaf Blight",
        confidence_percent: 89,
        is_healthy: false,
        symptoms: &["Cigar-shaped lesions, yellowing leaves"],
        treatment_steps: &[],
        prevention_tips: &[],
    },
    DiagnosisRecord {
        crop_name: "Wheat",
        disease_label: "Rust Disease",
        confidence_percent: 92,
        is_healthy: false,
        symptoms: &["Orange-red pustules on leaves"],
        treatment_steps: &[],
        prevention_tips: &[],
    },
    DiagnosisRecord {
        crop_name: "Apple",
        disease_label: "Healthy",
        confidence_percent: 96,
        is_healthy: true,
        symptoms: &["No disease symptoms present"],
        treatment_steps: &[],
        prevention_tips: &[],
    },
];

/// カタログから一様に1件選ぶ（空なら None）
///
/// 再試行・重み付けなし。同じシードなら同じレコードを返す。
pub fn select<'a, R: Rng + ?Sized>(catalog: &'a [DiagnosisRecord], rng: &mut R) -> Option<&'a DiagnosisRecord> {
    if catalog.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..catalog.len());
    tracing::debug!(index, crop = catalog[index].crop_name, "diagnosis selected");
    catalog.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_records_are_well_formed() {
        for record in DIAGNOSIS_CATALOG.iter().chain(SAMPLE_DETECTIONS.iter()) {
            assert!(record.confidence_percent <= 100);
            assert!(!record.crop_name.is_empty());
            if !record.is_healthy {
                assert!(!record.symptoms.is_empty(), "{} has no symptoms", record.crop_name);
            }
        }
    }

    #[test]
    fn test_healthy_record_has_no_treatment() {
        let tomato = &DIAGNOSIS_CATALOG[0];
        assert!(tomato.is_healthy);
        assert!(tomato.treatment_steps.is_empty());
        assert_eq!(tomato.prevention_tips.len(), 4);
    }

    #[test]
    fn test_select_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select(&[], &mut rng).is_none());
    }

    #[test]
    fn test_select_same_seed_same_record() {
        for seed in [0u64, 1, 42, 2024] {
            let first = select(&DIAGNOSIS_CATALOG, &mut StdRng::seed_from_u64(seed)).unwrap();
            let second = select(&DIAGNOSIS_CATALOG, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(std::ptr::eq(first, second));
        }
    }

    #[test]
    fn test_select_returns_catalog_reference() {
        let mut rng = StdRng::seed_from_u64(9);
        let record = select(&DIAGNOSIS_CATALOG, &mut rng).unwrap();
        assert!(DIAGNOSIS_CATALOG.iter().any(|r| std::ptr::eq(r, record)));
    }

    #[test]
    fn test_select_covers_every_record() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let record = select(&DIAGNOSIS_CATALOG, &mut rng).unwrap();
            let index = DIAGNOSIS_CATALOG.iter().position(|r| std::ptr::eq(r, record)).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
