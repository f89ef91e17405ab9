//! 解析結果のテキスト表示

use crate::analyzer::{AnalysisReport, ReportStatus};
use crop_detect_common::DiagnosisRecord;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// 信頼度バー（例: `[##########----------] 50%`）
pub fn confidence_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// 診断レコードの詳細表示
pub fn render_record(record: &DiagnosisRecord) -> String {
    let mut out = String::new();
    let status_icon = if record.is_healthy { "✔" } else { "⚠" };

    let _ = writeln!(out, "{} Analysis Complete", status_icon);
    let _ = writeln!(out, "  Crop Type       : {}", record.crop_name);
    let _ = writeln!(out, "  Health Status   : {}", record.disease_label);
    let _ = writeln!(
        out,
        "  Confidence Level: {} ({})",
        confidence_bar(record.confidence_percent),
        record.confidence_tier().as_str()
    );

    // 健康な場合は症状・処置を出さない
    if !record.is_healthy {
        if !record.symptoms.is_empty() {
            let _ = writeln!(out, "\nSymptoms:");
            for symptom in record.symptoms {
                let _ = writeln!(out, "  - {}", symptom);
            }
        }
        if !record.treatment_steps.is_empty() {
            let _ = writeln!(out, "\nTreatment:");
            for (i, step) in record.treatment_steps.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, step);
            }
        }
    }

    if !record.prevention_tips.is_empty() {
        let _ = writeln!(out, "\nPrevention Tips:");
        for tip in record.prevention_tips {
            let _ = writeln!(out, "  * {}", tip);
        }
    }

    out
}

/// 検出例の一覧用（1行）
pub fn render_sample_line(record: &DiagnosisRecord) -> String {
    let symptoms = record.symptoms.first().copied().unwrap_or("-");
    format!(
        "{:<8} {:<22} {:>3}%  {}",
        record.crop_name, record.disease_label, record.confidence_percent, symptoms
    )
}

pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = write!(out, "File: {} ({} bytes", report.file_name, report.byte_size);
    if let Some((w, h)) = report.dimensions {
        let _ = write!(out, ", {}x{}", w, h);
    }
    let _ = writeln!(out, ")\n");

    match (report.status, report.diagnosis) {
        (ReportStatus::Diagnosed, Some(record)) => out.push_str(&render_record(record)),
        _ => {
            let message = report.message.as_deref().unwrap_or("Not Detectable – Please upload a valid crop image.");
            let _ = writeln!(out, "✖ {}", message);
        }
    }

    out
}
