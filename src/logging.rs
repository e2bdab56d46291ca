//! ログシステムの初期化
//!
//! コンソール出力と日次ローテーションのファイル出力を設定に応じて構成する

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogSettings;

/// ログ設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
    /// ログディレクトリ（未設定ならファイル出力なし）
    pub log_dir: Option<PathBuf>,
    /// コンソール出力有効
    ///
    /// ダッシュボードモードでは代替スクリーンを壊さないよう無効にする
    pub console_enabled: bool,
}

impl LogConfig {
    /// アプリ設定からログ設定を作成
    pub fn from_settings(settings: &LogSettings, console_enabled: bool) -> Self {
        Self {
            level: settings.level.clone(),
            log_dir: settings.dir.as_ref().map(PathBuf::from),
            console_enabled,
        }
    }
}

/// ログディレクトリを確保
fn ensure_log_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// ログシステムを初期化
///
/// ファイル出力が有効な場合は返される `WorkerGuard` を保持し続けること。
/// ドロップするとバッファ済みのログが書き出されない。
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    // RUST_LOG があれば優先、なければ設定値を使う
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info")));

    let console_layer = if config.console_enabled {
        Some(fmt::layer().with_writer(std::io::stderr))
    } else {
        None
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            ensure_log_dir(dir)?;
            let file_appender = rolling::daily(dir, "spc-rs.log");
            let (writer, guard) = non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer.map(|l| l.boxed()))
        .with(file_layer.map(|l| l.boxed()))
        .init();

    tracing::debug!("📝 ログシステム初期化完了");
    if let Some(dir) = &config.log_dir {
        tracing::debug!("📂 ログディレクトリ: {}", dir.display());
    }

    Ok(guard)
}
