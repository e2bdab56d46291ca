use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use spc_rs::config::SpcConfig;
use spc_rs::dashboard::run_dashboard;
use spc_rs::engine::RuleEngine;
use spc_rs::logging::{init_logging, LogConfig};
use spc_rs::{ControlApiClient, ControlDataSource};

/// SPC control chart monitor
#[derive(Debug, Parser)]
#[command(name = "spc-rs", version, about)]
struct Args {
    /// ケース識別子（指定時はダッシュボードを起動せずテキストレポートを出力）
    #[arg(short, long)]
    case: Option<String>,

    /// Control API のベースURLを上書き
    #[arg(long, env = "SPC_API_BASE_URL")]
    api_url: Option<String>,

    /// 設定ファイルのパス
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 設定を読み込み
    let mut config = SpcConfig::load(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }

    // ログを初期化（ダッシュボードモードではコンソール出力を抑止）
    let console_enabled = args.case.is_some();
    let log_config = LogConfig::from_settings(&config.log, console_enabled);
    let _guard = init_logging(&log_config)?;

    let client = ControlApiClient::new(&config.api.base_url, config.api.timeout_seconds)?;

    match args.case {
        Some(case) => run_report(client, &case).await,
        None => {
            let data_source: Arc<dyn ControlDataSource> = Arc::new(client);
            run_dashboard(data_source).await?;
            Ok(())
        }
    }
}

/// ワンショットのテキストレポートを出力
async fn run_report(client: ControlApiClient, case: &str) -> anyhow::Result<()> {
    let control_case = client
        .fetch_case(case)
        .await
        .context("Error fetching data from the API. Please try again.")?;

    let engine = RuleEngine::new();
    let anomalies = engine.evaluate(&control_case.values, &control_case.params);

    println!(
        "Case {}: {} points (center {}, UCL {}, LCL {})",
        case,
        control_case.values.len(),
        control_case.params.center,
        control_case.params.upper_limit,
        control_case.params.lower_limit
    );

    if anomalies.is_empty() {
        println!("✅ No anomalies found.");
    } else {
        for anomaly in &anomalies {
            println!("⚠ {}", anomaly.message);
        }
    }

    Ok(())
}
