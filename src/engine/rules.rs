//! Rule Engine Implementation
//!
//! Western Electric ルール評価エンジンの実装

use super::stats::sigma_about;
use super::types::{Anomaly, ControlParameters, RuleId};

/// 中心線に対する点の側
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// 中心線より上
    Above,
    /// 中心線以下（中心線上の点もこちらに数える）
    Below,
}

/// ルール評価エンジン
///
/// 状態を持たない純粋な評価器。同一入力に対して常に同一の結果列を返し、
/// 複数の評価要求から同時に呼び出しても安全。
#[derive(Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// 新しいエンジンを作成
    pub fn new() -> Self {
        Self
    }

    /// 系列全体を4つのルールで評価し、異常の一覧を返す
    ///
    /// ルールは 1→2→3→4 の固定順で独立に評価され、結果はその順に並ぶ。
    /// 同じ点が複数のルールで報告されることもある（重複排除はしない）。
    /// 空の系列は空の結果を返す（エラーにはならない）。
    pub fn evaluate(&self, series: &[f64], params: &ControlParameters) -> Vec<Anomaly> {
        let sigma = sigma_about(series, params.center);

        let mut anomalies = Vec::new();
        anomalies.extend(self.out_of_limits(series, params));
        anomalies.extend(self.two_of_three_beyond_2_sigma(series, params.center, sigma));
        anomalies.extend(self.four_of_five_beyond_1_sigma(series, params.center, sigma));
        anomalies.extend(self.eight_consecutive_same_side(series, params.center));
        anomalies
    }

    /// ルール1: 管理限界の外に出た点
    fn out_of_limits(&self, series: &[f64], params: &ControlParameters) -> Vec<Anomaly> {
        series
            .iter()
            .enumerate()
            .filter(|(_, &v)| v > params.upper_limit || v < params.lower_limit)
            .map(|(i, &v)| {
                Anomaly::new(
                    RuleId::OutOfLimits,
                    vec![i + 1],
                    format!("Point {} out of control: value = {}", i + 1, v),
                )
            })
            .collect()
    }

    /// ルール2: 連続3点のうち2点が2シグマを超えて偏る
    fn two_of_three_beyond_2_sigma(&self, series: &[f64], center: f64, sigma: f64) -> Vec<Anomaly> {
        let two_sigma = 2.0 * sigma;
        let mut anomalies = Vec::new();

        for i in 2..series.len() {
            let window = &series[i - 2..=i];
            let beyond = window.iter().filter(|&&v| (v - center).abs() > two_sigma).count();
            if beyond >= 2 {
                // 報告ラベルは元実装の添字計算をそのまま踏襲する
                anomalies.push(Anomaly::new(
                    RuleId::TwoOfThreeBeyond2Sigma,
                    vec![i - 1, i, i + 1],
                    format!(
                        "Trend at points {}, {} and {} beyond 2-sigma",
                        i - 1,
                        i,
                        i + 1
                    ),
                ));
            }
        }

        anomalies
    }

    /// ルール3: 連続5点のうち4点が1シグマを超えて偏る
    fn four_of_five_beyond_1_sigma(&self, series: &[f64], center: f64, sigma: f64) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        for i in 4..series.len() {
            let window = &series[i - 4..=i];
            let beyond = window.iter().filter(|&&v| (v - center).abs() > sigma).count();
            if beyond >= 4 {
                anomalies.push(Anomaly::new(
                    RuleId::FourOfFiveBeyond1Sigma,
                    (i - 3..=i + 1).collect(),
                    format!("Trend at points {} to {} beyond 1-sigma", i - 3, i + 1),
                ));
            }
        }

        anomalies
    }

    /// ルール4: 中心線の同じ側に8点以上連続
    ///
    /// カウンタが8に達した後も同じ側が続く限り毎回発火する
    /// （ランが伸びるたびに重なった異常を追加報告する）。
    fn eight_consecutive_same_side(&self, series: &[f64], center: f64) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();
        let mut run_length = 0usize;
        let mut current_side: Option<Side> = None;

        for (i, &v) in series.iter().enumerate() {
            let side = if v > center { Side::Above } else { Side::Below };
            if current_side == Some(side) {
                run_length += 1;
            } else {
                run_length = 1;
                current_side = Some(side);
            }

            if run_length >= 8 {
                anomalies.push(Anomaly::new(
                    RuleId::EightConsecutiveSameSide,
                    (i - 7..=i).collect(),
                    format!(
                        "Eight consecutive points on the same side of center from point {} to {}",
                        i - 7,
                        i
                    ),
                ));
            }
        }

        anomalies
    }
}
