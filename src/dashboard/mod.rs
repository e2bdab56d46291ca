//! 管理図ダッシュボード
//!
//! ケース選択・チャート描画・アラート表示のターミナルUI

pub mod app;
pub mod charts;
pub mod runner;
pub mod ui;

pub use app::{DashboardApp, DashboardState};
pub use charts::ControlChart;
pub use runner::run_dashboard;
pub use ui::render_dashboard;
