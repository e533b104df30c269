//! Exponential Moving Average (EMA) indicator.

use super::{defined, ema};
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. The first value is the
/// SMA of the first `period` closes.
pub struct Ema {
    period: usize,
    id: String,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            id: IndicatorKey::Ema(period).to_string(),
            name: format!("EMA ({})", period),
        }
    }
}

impl Indicator for Ema {
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
            IndicatorKey::Ema(self.period),
            Series::from_values(ema(&closes, self.period)),
        )]
    }
}
