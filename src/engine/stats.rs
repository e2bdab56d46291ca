//! Dispersion Helper
//!
//! 中心線まわりの母標準偏差

/// 中心線まわりの母標準偏差を計算
///
/// `sigma = sqrt((1/N) * Σ (x_i - center)^2)`
///
/// 系列自身の平均ではなく、与えられた `center` からの偏差で計算する。
/// 空の系列では 0.0 を返す（呼び出し側はウィンドウ長のガードで先に弾く）。
pub fn sigma_about(values: &[f64], center: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum_sq_diff: f64 = values.iter().map(|v| (v - center).powi(2)).sum();
    let variance = sum_sq_diff / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigma_about_center() {
        // [1..5] を中心3で評価: 分散 = (4+1+0+1+4)/5 = 2
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sigma = sigma_about(&values, 3.0);
        assert!((sigma - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sigma_about_supplied_center_not_mean() {
        // 中心が系列平均と異なる場合も center からの偏差で計算する
        let values = vec![10.0; 8];
        let sigma = sigma_about(&values, 5.0);
        assert!((sigma - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sigma_empty() {
        assert_eq!(sigma_about(&[], 3.0), 0.0);
    }

    #[test]
    fn test_sigma_zero_for_constant_series_at_center() {
        let values = vec![7.5; 10];
        assert_eq!(sigma_about(&values, 7.5), 0.0);
    }
}
