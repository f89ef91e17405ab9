//! Crop Detect CLI / HTTP
//!
//! 共通ワークフロー（crop-detect-common）をネイティブ環境で動かす。

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod scanner;
pub mod server;
