//! Average True Range (ATR) indicator.

use super::wilder;
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceBar, PriceSeries, Series};

/// ATR (Average True Range) indicator.
///
/// Measures market volatility by averaging true ranges:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// The first bar has no previous close, so the first true range is on the
/// second bar. Averaging uses Wilder's smoothing.
pub struct Atr {
    period: usize,
    name: String,
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("ATR ({})", period),
        }
    }

    /// Calculate True Range.
    fn true_range(current: &PriceBar, previous: &PriceBar) -> f64 {
        let hl = current.high - current.low;
        let hc = (current.high - previous.close).abs();
        let lc = (current.low - previous.close).abs();
        hl.max(hc).max(lc)
    }
}

impl Indicator for Atr {
    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let bars = series.bars();
        let mut true_ranges = vec![None; bars.len()];
        for i in 1..bars.len() {
            true_ranges[i] = Some(Self::true_range(&bars[i], &bars[i - 1]));
        }

        vec![(
            IndicatorKey::Atr,
            Series::from_values(wilder(&true_ranges, self.period)),
        )]
    }
}
