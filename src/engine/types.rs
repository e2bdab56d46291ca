//! Rule Engine Types
//!
//! ルール評価用の型定義

use serde::{Deserialize, Serialize};

/// 管理図パラメータ（中心線と管理限界）
///
/// `lower_limit <= center <= upper_limit` は呼び出し側の責任であり、
/// エンジンは検証しない（違反時も定義された結果を返す）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlParameters {
    /// 中心線（目標値）
    pub center: f64,
    /// 上方管理限界
    pub upper_limit: f64,
    /// 下方管理限界
    pub lower_limit: f64,
}

/// 検知ルールの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleId {
    /// ルール1: 管理限界外の点
    OutOfLimits,
    /// ルール2: 連続3点中2点が2シグマ超
    TwoOfThreeBeyond2Sigma,
    /// ルール3: 連続5点中4点が1シグマ超
    FourOfFiveBeyond1Sigma,
    /// ルール4: 中心線の同じ側に8点連続
    EightConsecutiveSameSide,
}

/// 検知された異常
///
/// 評価のたびに新規生成され、評価をまたいで保持・統合されることはない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// 発火したルール
    pub rule: RuleId,
    /// 報告ラベル（メッセージに現れる点番号と常に一致する）
    pub points: Vec<usize>,
    /// 人間向けの説明
    pub message: String,
}

impl Anomaly {
    /// 新しい異常を作成
    pub fn new(rule: RuleId, points: Vec<usize>, message: impl Into<String>) -> Self {
        Self {
            rule,
            points,
            message: message.into(),
        }
    }
}
