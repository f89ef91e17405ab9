//! HTTPインターフェースの結合テスト
//!
//! ローカルの空きポートでサーバを起動し、reqwest で叩く。

use crop_detect::analyzer::AnalyzeOptions;
use crop_detect::server::{self, ServerState};
use crop_detect_common::{AnalysisConfig, DemoClassifier, MAX_UPLOAD_BYTES};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

async fn spawn_server(rejection_probability: f64) -> String {
    let classifier = DemoClassifier::from_seed(
        7,
        AnalysisConfig::default().with_rejection_probability(rejection_probability),
    );
    let options = AnalyzeOptions {
        delay: Duration::ZERO,
        show_progress: false,
    };
    let state = Arc::new(ServerState::new(classifier, options));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([20, 120, 40]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn upload(name: &str, mime: &str, bytes: Vec<u8>) -> Form {
    let part = Part::bytes(bytes).file_name(name.to_string()).mime_str(mime).unwrap();
    Form::new().part("file", part)
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server(0.0).await;
    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_catalog_lists_three_records() {
    let base = spawn_server(0.0).await;
    let catalog: Value = reqwest::get(format!("{}/catalog", base)).await.unwrap().json().await.unwrap();

    let records = catalog.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["cropName"], "Tomato");
    assert_eq!(records[1]["diseaseLabel"], "Late Blight");
    assert_eq!(records[2]["confidencePercent"], 91);
}

#[tokio::test]
async fn test_analyze_crop_image() {
    let base = spawn_server(0.0).await;
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .multipart(upload("potato_leaf.png", "image/png", png_bytes()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report: Value = response.json().await.unwrap();
    assert_eq!(report["status"], "diagnosed");
    assert_eq!(report["dimensions"], serde_json::json!([4, 4]));
    assert!(report["diagnosis"]["cropName"].is_string());
}

#[tokio::test]
async fn test_analyze_animal_keyword_rejected() {
    let base = spawn_server(0.0).await;
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .multipart(upload("my_dog.png", "image/png", png_bytes()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report: Value = response.json().await.unwrap();
    assert_eq!(report["status"], "rejected");
    assert_eq!(report["verdict"]["containsAnimal"], true);
    assert_eq!(report["verdict"]["isValidCrop"], false);
    assert!(report.get("diagnosis").is_none());
}

#[tokio::test]
async fn test_analyze_gif_is_unsupported_media_type() {
    let base = spawn_server(0.0).await;
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .multipart(upload("photo.gif", "image/gif", b"GIF89a....".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please upload only JPG, JPEG, or PNG images.");
}

#[tokio::test]
async fn test_analyze_oversized_is_payload_too_large() {
    let base = spawn_server(0.0).await;
    let bytes = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .multipart(upload("big_leaf.jpg", "image/jpeg", bytes))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File size must be less than 10MB.");
}

#[tokio::test]
async fn test_analyze_without_file_field() {
    let base = spawn_server(0.0).await;
    let form = Form::new().text("note", "no file here");
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// ボディ上限を大きく超える 11MiB でもサイズ超過のメッセージを返す
#[tokio::test]
async fn test_analyze_eleven_mib_is_file_too_large() {
    let base = spawn_server(0.0).await;
    let bytes = vec![0u8; 11 * 1024 * 1024];
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .multipart(upload("plant.jpg", "image/jpeg", bytes))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File size must be less than 10MB.");
}
