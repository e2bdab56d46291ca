//! ダッシュボードの実行
//!
//! ターミナルの初期化・復元とメインループ

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use super::{app::DashboardApp, ui::render_dashboard};
use crate::client::ControlDataSource;
use crate::error::{Error, Result};

/// ダッシュボードを実行
pub async fn run_dashboard(data_source: Arc<dyn ControlDataSource>) -> Result<()> {
    // ターミナルを初期化
    enable_raw_mode().map_err(|e| Error::Dashboard(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| Error::Dashboard(format!("Failed to setup terminal: {}", e)))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| Error::Dashboard(format!("Failed to create terminal: {}", e)))?;

    // アプリケーションを初期化
    let mut app = DashboardApp::new(data_source);

    // メインループを実行
    let result = run_main_loop(&mut terminal, &mut app).await;

    // ターミナルを復元
    disable_raw_mode().map_err(|e| Error::Dashboard(format!("Failed to disable raw mode: {}", e)))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| Error::Dashboard(format!("Failed to restore terminal: {}", e)))?;
    terminal
        .show_cursor()
        .map_err(|e| Error::Dashboard(format!("Failed to show cursor: {}", e)))?;

    result
}

/// メインループを実行
async fn run_main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
) -> Result<()> {
    use crossterm::event::{Event, KeyEventKind};

    // 定期更新タイマー
    let mut update_interval = interval(Duration::from_millis(250));

    loop {
        // UIを描画
        terminal
            .draw(|f| render_dashboard(f, app))
            .map_err(|e| Error::Dashboard(format!("Failed to draw UI: {}", e)))?;

        // イベントを処理
        tokio::select! {
            // 定期更新
            _ = update_interval.tick() => {
                // 保留中の取得要求を処理
                if let Some(case) = app.take_pending_case() {
                    app.apply_fetch(case).await;
                }
            }

            // キーボード入力を直接処理
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if crossterm::event::poll(Duration::from_millis(0))
                    .map_err(|e| Error::Dashboard(format!("Failed to poll events: {}", e)))?
                {
                    let event = crossterm::event::read()
                        .map_err(|e| Error::Dashboard(format!("Failed to read event: {}", e)))?;

                    if let Event::Key(key) = event {
                        if key.kind == KeyEventKind::Press && app.handle_event(Event::Key(key))? {
                            break; // 終了要求
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
