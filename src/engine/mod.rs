//! 管理図ルール評価エンジン
//!
//! Western Electric ルールに基づく異常検知の中核モジュール

pub mod rules;
pub mod stats;
pub mod types;

pub use rules::RuleEngine;
pub use stats::sigma_about;
pub use types::{Anomaly, ControlParameters, RuleId};
