//! Bollinger Bands indicator.

use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Standard deviation is the population deviation of the same window.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Calculate standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &str {
        "bollinger"
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let closes = series.closes();
        let n = closes.len();
        let mut upper = vec![None; n];
        let mut middle = vec![None; n];
        let mut lower = vec![None; n];

        if self.period > 0 && n >= self.period {
            for i in (self.period - 1)..n {
                let window = &closes[i + 1 - self.period..=i];
                let mean = window.iter().sum::<f64>() / self.period as f64;
                let width = self.std_dev_multiplier * Self::std_dev(window, mean);
                upper[i] = Some(mean + width);
                middle[i] = Some(mean);
                lower[i] = Some(mean - width);
            }
        }

        vec![
            (IndicatorKey::BollingerUpper, Series::from_values(upper)),
            (IndicatorKey::BollingerMiddle, Series::from_values(middle)),
            (IndicatorKey::BollingerLower, Series::from_values(lower)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::*;

    #[test]
    fn test_bollinger_insufficient_data() {
        let out = BollingerBands::default().calculate(&create_uptrend_series(19));
        assert!(out.iter().all(|(_, s)| s.is_all_undefined()));
    }

    #[test]
    fn test_bollinger_band_order() {
        let out = BollingerBands::default().calculate(&create_uptrend_series(30));
        let (upper, middle, lower) = (
            out[0].1.last().unwrap(),
            out[1].1.last().unwrap(),
            out[2].1.last().unwrap(),
        );
        assert!(upper > middle && middle > lower);
        assert!(((upper - middle) - (middle - lower)).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_flat_collapses() {
        let out = BollingerBands::default().calculate(&create_flat_series(25, 42.0));
        assert_eq!(out[0].1.last(), Some(42.0));
        assert_eq!(out[2].1.last(), Some(42.0));
    }

    #[test]
    fn test_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(BollingerBands::std_dev(&values, 5.0), 2.0);
    }
}
