//! Risk statistics over the close series.

use tracing::debug;

use crate::config::RiskConfig;
use crate::types::{PriceSeries, RiskProfile, RiskTier};

/// Simple period-over-period returns. The first bar has no prior close and
/// a zero prior close has no defined return; both are skipped.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation. Undefined below two observations.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Linearly interpolated quantile, `q` in [0, 1].
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Largest decline from a running peak, as a fraction (zero or negative).
///
/// The curve starts at the first close, so a series that only falls still
/// reports its loss from the opening level.
pub fn max_drawdown(closes: &[f64]) -> Option<f64> {
    let first = *closes.first()?;
    let mut peak = first;
    let mut worst = 0.0_f64;
    for &close in closes {
        if close > peak {
            peak = close;
        }
        if peak > 0.0 {
            worst = worst.min(close / peak - 1.0);
        }
    }
    Some(worst)
}

/// Computes a [`RiskProfile`] from closes.
#[derive(Debug, Clone, Default)]
pub struct RiskAnalyzer {
    config: RiskConfig,
}

impl RiskAnalyzer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Step function of annualized volatility in percent.
    pub fn tier(&self, annualized_volatility_pct: Option<f64>) -> RiskTier {
        match annualized_volatility_pct {
            None => RiskTier::InsufficientData,
            Some(v) if v < self.config.low_volatility_pct => RiskTier::Low,
            Some(v) if v < self.config.moderate_volatility_pct => RiskTier::Moderate,
            Some(_) => RiskTier::High,
        }
    }

    pub fn analyze(&self, series: &PriceSeries) -> RiskProfile {
        let closes = series.closes();
        let returns = simple_returns(&closes);
        if returns.is_empty() {
            debug!("no returns in {} bars: risk metrics undefined", closes.len());
            return RiskProfile::insufficient(0);
        }

        let days = self.config.trading_days;
        let annualized_return_pct = mean(&returns).map(|m| m * days * 100.0);
        let annualized_volatility_pct = sample_std_dev(&returns)
            .map(|s| s * days.sqrt() * 100.0)
            .map(|v| if v <= self.config.zero_volatility_pct { 0.0 } else { v });

        let sharpe_ratio = match (annualized_return_pct, annualized_volatility_pct) {
            (Some(_), Some(vol)) if vol == 0.0 => Some(0.0),
            (Some(ret), Some(vol)) => Some((ret / 100.0 - self.config.risk_free_rate) / (vol / 100.0)),
            _ => None,
        };

        let tier = self.tier(annualized_volatility_pct);
        if tier == RiskTier::InsufficientData {
            debug!("{} return(s): volatility undefined", returns.len());
        }

        RiskProfile {
            observations: returns.len(),
            annualized_return_pct,
            annualized_volatility_pct,
            sharpe_ratio,
            max_drawdown_pct: max_drawdown(&closes).map(|d| d * 100.0),
            value_at_risk_pct: quantile(&returns, 1.0 - self.config.var_confidence)
                .map(|q| q * 100.0),
            tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::*;
    use crate::types::PriceBar;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new(i as i64 * 86_400_000, c, c, c, c, 0.0))
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);
        assert!(simple_returns(&[0.0, 1.0, 2.0]).len() == 1);
        assert!(simple_returns(&[5.0]).is_empty());
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[1.0]), None);
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.138_089_935).abs() < 1e-8);
    }

    #[test]
    fn test_quantile_interpolates() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        assert!((quantile(&values, 0.05).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(quantile(&[3.0, 1.0], 0.5), Some(2.0));
        assert_eq!(quantile(&[-0.02], 0.05), Some(-0.02));
        assert_eq!(quantile(&[], 0.05), None);
    }

    #[test]
    fn test_max_drawdown() {
        let dd = max_drawdown(&[100.0, 120.0, 90.0, 130.0, 117.0]).unwrap();
        assert!((dd + 0.25).abs() < 1e-12);
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), Some(0.0));
        assert!((max_drawdown(&[10.0, 8.0]).unwrap() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_tier_boundaries() {
        let analyzer = RiskAnalyzer::default();
        assert_eq!(analyzer.tier(Some(19.9)), RiskTier::Low);
        assert_eq!(analyzer.tier(Some(20.0)), RiskTier::Moderate);
        assert_eq!(analyzer.tier(Some(34.99)), RiskTier::Moderate);
        assert_eq!(analyzer.tier(Some(35.0)), RiskTier::High);
        assert_eq!(analyzer.tier(None), RiskTier::InsufficientData);
    }

    #[test]
    fn test_flat_series() {
        let profile = RiskAnalyzer::default().analyze(&create_flat_series(30, 10.0));
        assert_eq!(profile.observations, 29);
        assert_eq!(profile.annualized_volatility_pct, Some(0.0));
        assert_eq!(profile.sharpe_ratio, Some(0.0));
        assert_eq!(profile.annualized_return_pct, Some(0.0));
        assert_eq!(profile.max_drawdown_pct, Some(0.0));
        assert_eq!(profile.tier, RiskTier::Low);
    }

    #[test]
    fn test_single_bar_is_insufficient() {
        let profile = RiskAnalyzer::default().analyze(&series_from_closes(&[10.0]));
        assert_eq!(profile, RiskProfile::insufficient(0));
    }

    #[test]
    fn test_two_bars_single_return() {
        let profile = RiskAnalyzer::default().analyze(&series_from_closes(&[10.0, 11.0]));
        assert_eq!(profile.observations, 1);
        assert!((profile.annualized_return_pct.unwrap() - 2520.0).abs() < 1e-9);
        assert_eq!(profile.annualized_volatility_pct, None);
        assert_eq!(profile.sharpe_ratio, None);
        assert!((profile.value_at_risk_pct.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(profile.tier, RiskTier::InsufficientData);
    }

    #[test]
    fn test_constant_growth_has_no_volatility() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let profile = RiskAnalyzer::default().analyze(&series_from_closes(&closes));
        assert_eq!(profile.annualized_volatility_pct, Some(0.0));
        assert_eq!(profile.sharpe_ratio, Some(0.0));
        assert_eq!(profile.tier, RiskTier::Low);
        assert!((profile.annualized_return_pct.unwrap() - 252.0).abs() < 1e-6);
        assert_eq!(profile.max_drawdown_pct, Some(0.0));
    }

    #[test]
    fn test_sharpe_uses_risk_free_rate() {
        let series = series_from_closes(&[100.0, 101.0, 100.5, 102.0, 101.0, 103.0]);
        let profile = RiskAnalyzer::default().analyze(&series);
        let ret = profile.annualized_return_pct.unwrap();
        let vol = profile.annualized_volatility_pct.unwrap();
        let expected = (ret / 100.0 - 0.10) / (vol / 100.0);
        assert!((profile.sharpe_ratio.unwrap() - expected).abs() < 1e-12);
        assert!(profile.value_at_risk_pct.unwrap() < 0.0);
    }
}
