//! 設定の読み込み
//!
//! デフォルト値 → 設定ファイル → 環境変数の順に重ねて解決する

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpcConfig {
    pub api: ApiConfig,
    pub log: LogSettings,
}

/// Control API の接続設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// ケース識別子を付加するベースURL
    pub base_url: String,
    /// リクエストタイムアウト（秒）
    pub timeout_seconds: u64,
}

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
    /// ログファイル出力先ディレクトリ（未設定ならファイル出力なし）
    pub dir: Option<String>,
}

impl Default for SpcConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://apidemo.geoeducacion.com.ar/api/testing/control".to_string(),
                timeout_seconds: 10,
            },
            log: LogSettings {
                level: "info".to_string(),
                dir: None,
            },
        }
    }
}

impl SpcConfig {
    /// 設定ファイルから読み込み、環境変数で上書き
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // デフォルト値を設定
        let default_config = SpcConfig::default();
        settings = settings.add_source(
            config::Config::try_from(&default_config).map_err(|e| Error::Config(e.to_string()))?,
        );

        if let Some(path) = explicit_path {
            let path = path
                .to_str()
                .ok_or_else(|| Error::Config("config path is not valid UTF-8".to_string()))?;
            settings = settings.add_source(config::File::with_name(path));
        } else {
            // 設定ファイルを読み込み（複数の場所を試行）
            let config_paths = ["spc-config.toml", "config.toml", "config/spc.toml"];

            for path in &config_paths {
                if Path::new(path).exists() {
                    println!("📁 設定ファイルを読み込み: {}", path);
                    settings = settings.add_source(config::File::with_name(path));
                    break;
                }
            }
        }

        // 環境変数で上書き (SPC_で始まる変数)
        settings = settings.add_source(
            config::Environment::with_prefix("SPC")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| Error::Config(e.to_string()))?
            .try_deserialize::<SpcConfig>()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpcConfig::default();
        assert!(config.api.base_url.starts_with("https://"));
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.log.level, "info");
        assert!(config.log.dir.is_none());
    }
}
