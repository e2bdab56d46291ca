//! 管理図チャートデータ
//!
//! 取得した1ケース分を描画可能な形に変換して保持する

use crate::client::ControlCase;
use crate::engine::ControlParameters;

/// 管理図チャート
///
/// 取得のたびに新しいインスタンスを構築し、前のインスタンスを置き換える。
/// 古いチャートは置き換え時にドロップされ、描画面に累積しない。
#[derive(Debug, Clone)]
pub struct ControlChart {
    /// 測定値の折れ線 (点番号, 値)
    series: Vec<(f64, f64)>,
    /// 中心線（全点にわたるフラットな線）
    center_line: Vec<(f64, f64)>,
    /// 上方管理限界線
    upper_line: Vec<(f64, f64)>,
    /// 下方管理限界線
    lower_line: Vec<(f64, f64)>,
    /// 表示用ラベル列
    labels: Vec<String>,
    /// 管理図パラメータ
    params: ControlParameters,
    /// Y軸の表示範囲
    y_bounds: [f64; 2],
}

impl ControlChart {
    /// ケースからチャートデータを構築
    pub fn from_case(case: &ControlCase) -> Self {
        let n = case.values.len();
        let series: Vec<(f64, f64)> = case
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();

        let flat = |y: f64| -> Vec<(f64, f64)> { (0..n).map(|i| (i as f64, y)).collect() };

        // 系列と3本の基準線がすべて収まる範囲に少し余白を足す
        let mut y_min = case.params.lower_limit.min(case.params.center);
        let mut y_max = case.params.upper_limit.max(case.params.center);
        for &v in &case.values {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
        let margin = ((y_max - y_min).abs() * 0.1).max(1.0);

        Self {
            series,
            center_line: flat(case.params.center),
            upper_line: flat(case.params.upper_limit),
            lower_line: flat(case.params.lower_limit),
            labels: case.labels.clone(),
            params: case.params,
            y_bounds: [y_min - margin, y_max + margin],
        }
    }

    /// 測定値の折れ線データを取得
    pub fn series(&self) -> &[(f64, f64)] {
        &self.series
    }

    /// 中心線データを取得
    pub fn center_line(&self) -> &[(f64, f64)] {
        &self.center_line
    }

    /// 上方管理限界線データを取得
    pub fn upper_line(&self) -> &[(f64, f64)] {
        &self.upper_line
    }

    /// 下方管理限界線データを取得
    pub fn lower_line(&self) -> &[(f64, f64)] {
        &self.lower_line
    }

    /// 表示用ラベル列を取得
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// 管理図パラメータを取得
    pub fn params(&self) -> &ControlParameters {
        &self.params
    }

    /// X軸の表示範囲を取得
    pub fn x_bounds(&self) -> [f64; 2] {
        let n = self.series.len();
        if n <= 1 {
            [0.0, 1.0]
        } else {
            [0.0, (n - 1) as f64]
        }
    }

    /// Y軸の表示範囲を取得
    pub fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ControlCase;

    fn sample_case() -> ControlCase {
        ControlCase {
            labels: vec!["a".into(), "b".into(), "c".into()],
            values: vec![4.0, 5.0, 6.0],
            params: ControlParameters {
                center: 5.0,
                upper_limit: 10.0,
                lower_limit: 0.0,
            },
        }
    }

    #[test]
    fn test_chart_lines_cover_every_point() {
        let chart = ControlChart::from_case(&sample_case());
        assert_eq!(chart.series().len(), 3);
        assert_eq!(chart.center_line().len(), 3);
        assert_eq!(chart.upper_line().len(), 3);
        assert_eq!(chart.lower_line().len(), 3);
        assert_eq!(chart.series()[2], (2.0, 6.0));
        assert!(chart.center_line().iter().all(|&(_, y)| y == 5.0));
    }

    #[test]
    fn test_chart_bounds_enclose_series_and_limits() {
        let chart = ControlChart::from_case(&sample_case());
        let [y_min, y_max] = chart.y_bounds();
        assert!(y_min < 0.0);
        assert!(y_max > 10.0);
        assert_eq!(chart.x_bounds(), [0.0, 2.0]);
    }
}
