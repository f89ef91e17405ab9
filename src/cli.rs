use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crop-detect")]
#[command(about = "作物病害検出デモ（画像アップロード→検証→診断）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像1枚を解析して結果を表示
    Analyze {
        /// 画像ファイルのパス（--interactive では省略可）
        #[arg(required_unless_present = "interactive")]
        file: Option<PathBuf>,

        /// 乱数シード（同じシードなら同じ結果）
        #[arg(long)]
        seed: Option<u64>,

        /// 推論待ちの模擬遅延（ミリ秒、省略時は設定値）
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 対話モード（解析後に別の画像を続けて解析）
        #[arg(short, long)]
        interactive: bool,
    },

    /// 診断カタログを表示
    Catalog {
        /// トップページの検出例を表示
        #[arg(long)]
        samples: bool,
    },

    /// HTTPサーバを起動（POST /analyze）
    Serve {
        /// 待受アドレス（省略時は設定値）
        #[arg(short, long)]
        addr: Option<String>,

        /// 乱数シード
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 設定を表示/編集
    Config {
        /// 不合格確率を設定（0.0-1.0）
        #[arg(long)]
        set_rejection_probability: Option<f64>,

        /// 模擬遅延を設定（ミリ秒）
        #[arg(long)]
        set_delay_ms: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["crop-detect", "analyze", "leaf.jpg", "--seed", "7", "--delay-ms", "0"]);
        match cli.command {
            Commands::Analyze { file, seed, delay_ms, json, interactive } => {
                assert_eq!(file, Some(PathBuf::from("leaf.jpg")));
                assert_eq!(seed, Some(7));
                assert_eq!(delay_ms, Some(0));
                assert!(!json);
                assert!(!interactive);
            }
            _ => panic!("analyze expected"),
        }
    }

    #[test]
    fn test_analyze_requires_file_unless_interactive() {
        assert!(Cli::try_parse_from(["crop-detect", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["crop-detect", "analyze", "-i"]).is_ok());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["crop-detect", "catalog", "-v", "--samples"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Catalog { samples: true }));
    }
}
