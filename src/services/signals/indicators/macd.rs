//! MACD (Moving Average Convergence Divergence) indicator.

use super::{defined, ema};
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// Buy signal: MACD crosses above signal line
/// Sell signal: MACD crosses below signal line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }
}

impl Indicator for Macd {
    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        (self.fast_period.max(self.slow_period) + self.signal_period).saturating_sub(1)
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let closes = defined(&series.closes());

        let fast_ema = ema(&closes, self.fast_period);
        let slow_ema = ema(&closes, self.slow_period);

        let macd_line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        let signal_line = ema(&macd_line, self.signal_period);

        let histogram: Vec<Option<f64>> = macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect();

        vec![
            (IndicatorKey::MacdLine, Series::from_values(macd_line)),
            (IndicatorKey::MacdSignal, Series::from_values(signal_line)),
            (IndicatorKey::MacdHistogram, Series::from_values(histogram)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::*;

    #[test]
    fn test_macd_min_periods() {
        assert_eq!(Macd::default().min_periods(), 34);
    }

    #[test]
    fn test_macd_warm_up_alignment() {
        let out = Macd::default().calculate(&create_uptrend_series(40));
        assert_eq!(out[0].1.first_defined(), Some(25));
        assert_eq!(out[1].1.first_defined(), Some(33));
        assert_eq!(out[2].1.first_defined(), Some(33));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let out = Macd::default().calculate(&create_uptrend_series(33));
        assert!(out[1].1.is_all_undefined());
        assert!(out[2].1.is_all_undefined());
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let out = Macd::default().calculate(&create_uptrend_series(60));
        assert!(out[0].1.last().unwrap() > 0.0);
    }

    #[test]
    fn test_macd_histogram_is_difference() {
        let out = Macd::default().calculate(&create_downtrend_series(60));
        let (line, signal, hist) = (
            out[0].1.last().unwrap(),
            out[1].1.last().unwrap(),
            out[2].1.last().unwrap(),
        );
        assert!((hist - (line - signal)).abs() < 1e-12);
    }
}
