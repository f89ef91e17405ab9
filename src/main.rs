use clap::Parser;
use crop_detect::{analyzer, cli, config, error, logging, presenter, server};
use cli::{Cli, Commands};
use config::Config;
use crop_detect_common::{DemoClassifier, DIAGNOSIS_CATALOG, SAMPLE_DETECTIONS};
use error::{CropDetectError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { file, seed, delay_ms, json, interactive } => {
            let classifier = Mutex::new(match seed {
                Some(seed) => DemoClassifier::from_seed(seed, config.analysis_config()),
                None => DemoClassifier::from_entropy(config.analysis_config()),
            });
            let options = analyzer::AnalyzeOptions {
                delay: Duration::from_millis(delay_ms.unwrap_or(config.analysis_delay_ms)),
                show_progress: !json,
            };

            if interactive {
                run_interactive(file, &classifier, options).await?;
            } else if let Some(path) = file {
                analyze_one(&path, &classifier, options, json).await?;
            }
        }

        Commands::Catalog { samples } => {
            if samples {
                println!("Sample Detection Results\n");
                for record in SAMPLE_DETECTIONS.iter() {
                    println!("{}", presenter::render_sample_line(record));
                }
            } else {
                for (i, record) in DIAGNOSIS_CATALOG.iter().enumerate() {
                    println!("[{}] {}", i + 1, presenter::render_record(record));
                }
            }
        }

        Commands::Serve { addr, seed } => {
            let addr = addr.unwrap_or_else(|| config.server_addr.clone());
            let classifier = match seed {
                Some(seed) => DemoClassifier::from_seed(seed, config.analysis_config()),
                None => DemoClassifier::from_entropy(config.analysis_config()),
            };
            let options = analyzer::AnalyzeOptions {
                delay: Duration::from_millis(config.analysis_delay_ms),
                show_progress: false,
            };

            println!("🌱 crop-detect - 解析サーバ: http://{}", addr);
            server::serve(&addr, Arc::new(server::ServerState::new(classifier, options))).await?;
        }

        Commands::Config { set_rejection_probability, set_delay_ms, show } => {
            let mut config = config;

            if let Some(probability) = set_rejection_probability {
                config.set_rejection_probability(probability)?;
                println!("✔ 不合格確率を設定しました: {}", probability);
            }

            if let Some(delay_ms) = set_delay_ms {
                config.set_analysis_delay_ms(delay_ms)?;
                println!("✔ 模擬遅延を設定しました: {}ms", delay_ms);
            }

            if show {
                println!("設定:");
                println!("  不合格確率: {}", config.rejection_probability);
                println!("  模擬遅延: {}ms", config.analysis_delay_ms);
                println!("  待受アドレス: {}", config.server_addr);
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

async fn analyze_one(
    path: &std::path::Path,
    classifier: &Mutex<DemoClassifier>,
    options: analyzer::AnalyzeOptions,
    json: bool,
) -> Result<()> {
    if !json {
        println!("📸 crop-detect - 画像解析\n");
    }

    let report = analyzer::analyze_file(path, classifier, options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", presenter::render_report(&report));
    }
    Ok(())
}

/// 1枚ずつ解析し、「別の画像を解析」で繰り返す
async fn run_interactive(
    first: Option<PathBuf>,
    classifier: &Mutex<DemoClassifier>,
    options: analyzer::AnalyzeOptions,
) -> Result<()> {
    let mut next = first;

    loop {
        let path = match next.take() {
            Some(path) => path,
            None => {
                let input: String = dialoguer::Input::new()
                    .with_prompt("画像ファイルのパス (JPG/JPEG/PNG, 10MBまで)")
                    .interact_text()?;
                PathBuf::from(input.trim())
            }
        };

        match analyze_one(&path, classifier, options, false).await {
            Ok(()) => {}
            // 受付エラー・ファイルなし・情報取得失敗は表示して続行
            Err(e @ (CropDetectError::Intake(_) | CropDetectError::FileNotFound(_) | CropDetectError::Io(_))) => {
                println!("✖ {}", e);
            }
            Err(e) => return Err(e),
        }

        let again = dialoguer::Confirm::new()
            .with_prompt("Analyze another image?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
        println!();
    }

    Ok(())
}
