//! ダッシュボードアプリケーションの状態管理

use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::sync::Arc;

use super::charts::ControlChart;
use crate::client::ControlDataSource;
use crate::engine::{Anomaly, RuleEngine};
use crate::error::Result;

/// ダッシュボードの状態
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// 通常の閲覧モード
    Viewing,
    /// ヘルプ表示モード
    Help,
    /// 終了確認
    ConfirmExit,
}

/// ダッシュボードアプリケーションの状態管理
pub struct DashboardApp {
    /// データソースへの参照
    data_source: Arc<dyn ControlDataSource>,
    /// ルール評価エンジン
    engine: RuleEngine,
    /// アプリケーション状態
    state: DashboardState,
    /// 選択中のケース
    selected_case: Option<String>,
    /// 表示中のチャート（取得のたびに置き換える）
    chart: Option<ControlChart>,
    /// 直近の評価で検知された異常
    anomalies: Vec<Anomaly>,
    /// 取得エラーメッセージ
    error: Option<String>,
    /// 最終取得時刻
    fetched_at: Option<DateTime<Local>>,
    /// 保留中の取得要求（キー入力で設定し、ランナーが非同期に適用する）
    pending_case: Option<String>,
}

impl DashboardApp {
    /// 新しいダッシュボードアプリケーションを作成
    pub fn new(data_source: Arc<dyn ControlDataSource>) -> Self {
        Self {
            data_source,
            engine: RuleEngine::new(),
            state: DashboardState::Viewing,
            selected_case: None,
            chart: None,
            anomalies: Vec::new(),
            error: None,
            fetched_at: None,
            pending_case: None,
        }
    }

    /// イベントを処理
    ///
    /// 戻り値が `true` のとき終了要求。
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.state {
                DashboardState::Viewing => self.handle_viewing_keys(key.code),
                DashboardState::Help => self.handle_help_keys(key.code),
                DashboardState::ConfirmExit => self.handle_exit_confirmation_keys(key.code),
            },
            _ => Ok(false),
        }
    }

    /// 閲覧モードでのキー入力処理
    fn handle_viewing_keys(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Char('q') => {
                self.state = DashboardState::ConfirmExit;
                Ok(false)
            }
            KeyCode::Char('h') => {
                self.state = DashboardState::Help;
                Ok(false)
            }
            KeyCode::Char('r') => {
                // 選択中のケースを再取得
                if let Some(case) = self.selected_case.clone() {
                    self.pending_case = Some(case);
                }
                Ok(false)
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.pending_case = Some(c.to_string());
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// ヘルプモードでのキー入力処理
    fn handle_help_keys(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('h') => {
                self.state = DashboardState::Viewing;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// 終了確認でのキー入力処理
    fn handle_exit_confirmation_keys(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Ok(true), // 終了
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = DashboardState::Viewing;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// 保留中の取得要求を取り出してクリア
    pub fn take_pending_case(&mut self) -> Option<String> {
        self.pending_case.take()
    }

    /// ケースを取得して評価し、表示内容を丸ごと置き換える
    ///
    /// 成功時は古いチャートと異常一覧を新しいものが置き換える。
    /// 失敗時はチャートも異常一覧も表示しない（部分表示はしない）。
    pub async fn apply_fetch(&mut self, case: String) {
        self.selected_case = Some(case.clone());

        match self.data_source.fetch_case(&case).await {
            Ok(control_case) => {
                self.anomalies = self
                    .engine
                    .evaluate(&control_case.values, &control_case.params);
                self.chart = Some(ControlChart::from_case(&control_case));
                self.error = None;
                self.fetched_at = Some(Local::now());
                tracing::info!(%case, anomalies = self.anomalies.len(), "case evaluated");
            }
            Err(e) => {
                tracing::warn!(%case, error = %e, "failed to fetch control case");
                self.chart = None;
                self.anomalies.clear();
                self.error =
                    Some("Error fetching data from the API. Please try again.".to_string());
                self.fetched_at = None;
            }
        }
    }

    /// 現在の状態を取得
    pub fn get_state(&self) -> &DashboardState {
        &self.state
    }

    /// 選択中のケースを取得
    pub fn selected_case(&self) -> Option<&str> {
        self.selected_case.as_deref()
    }

    /// 表示中のチャートを取得
    pub fn chart(&self) -> Option<&ControlChart> {
        self.chart.as_ref()
    }

    /// 検知済みの異常一覧を取得
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// 取得エラーメッセージを取得
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 最終取得時刻を取得
    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ControlCase;
    use crate::engine::ControlParameters;
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use crossterm::event::{KeyEvent, KeyModifiers};

    /// 固定レスポンスを返すテスト用データソース
    struct StubSource {
        case: Option<ControlCase>,
    }

    #[async_trait]
    impl ControlDataSource for StubSource {
        async fn fetch_case(&self, _case: &str) -> Result<ControlCase> {
            self.case
                .clone()
                .ok_or_else(|| Error::Api("stub failure".to_string()))
        }
    }

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn loaded_source() -> Arc<dyn ControlDataSource> {
        Arc::new(StubSource {
            case: Some(ControlCase {
                labels: vec!["1".into(), "2".into(), "3".into()],
                values: vec![4.0, 5.0, 25.0],
                params: ControlParameters {
                    center: 5.0,
                    upper_limit: 10.0,
                    lower_limit: 0.0,
                },
            }),
        })
    }

    #[test]
    fn test_digit_key_requests_fetch() {
        let mut app = DashboardApp::new(loaded_source());
        assert!(!app.handle_event(press('3')).unwrap());
        assert_eq!(app.take_pending_case(), Some("3".to_string()));
        assert_eq!(app.take_pending_case(), None);
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = DashboardApp::new(loaded_source());
        assert!(!app.handle_event(press('q')).unwrap());
        assert_eq!(*app.get_state(), DashboardState::ConfirmExit);
        assert!(app.handle_event(press('y')).unwrap());
    }

    #[test]
    fn test_apply_fetch_replaces_chart_and_anomalies() {
        let mut app = DashboardApp::new(loaded_source());
        tokio_test::block_on(app.apply_fetch("1".to_string()));

        assert!(app.chart().is_some());
        assert!(app.error().is_none());
        // 25.0 は上方管理限界超え
        assert!(!app.anomalies().is_empty());
    }

    #[test]
    fn test_failed_fetch_clears_display_and_sets_error() {
        let mut app = DashboardApp::new(loaded_source());
        tokio_test::block_on(app.apply_fetch("1".to_string()));
        assert!(app.chart().is_some());

        let failing: Arc<dyn ControlDataSource> = Arc::new(StubSource { case: None });
        let mut app = DashboardApp {
            data_source: failing,
            ..app
        };
        tokio_test::block_on(app.apply_fetch("2".to_string()));

        assert!(app.chart().is_none());
        assert!(app.anomalies().is_empty());
        assert!(app.error().unwrap().contains("try again"));
    }
}
