//! Simple Moving Average (SMA) indicator.

use super::{defined, sma};
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// SMA (Simple Moving Average) indicator.
///
/// Calculates the average close over a period.
pub struct Sma {
    period: usize,
    id: String,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            id: IndicatorKey::Sma(period).to_string(),
            name: format!("SMA ({})", period),
        }
    }
}

impl Indicator for Sma {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let closes = defined(&series.closes());
        vec![(
            IndicatorKey::Sma(self.period),
            Series::from_values(sma(&closes, self.period)),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::test_support::*;

    #[test]
    fn test_sma_id_and_name() {
        let sma = Sma::new(20);
        assert_eq!(sma.id(), "sma_20");
        assert_eq!(sma.name(), "SMA (20)");
        assert_eq!(sma.category(), IndicatorCategory::Trend);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(20);
        let out = sma.calculate(&create_uptrend_series(19));
        assert!(out[0].1.is_all_undefined());
        assert_eq!(out[0].1.len(), 19);
    }

    #[test]
    fn test_sma_value() {
        let sma = Sma::new(3);
        let series = create_uptrend_series(5);
        let out = &sma.calculate(&series)[0].1;
        assert_eq!(out.first_defined(), Some(2));
        // closes: 101, 102.5, 104, 105.5, 107
        assert!((out.last().unwrap() - 105.5).abs() < 1e-9);
    }
}
