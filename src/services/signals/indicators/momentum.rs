//! Rate of change (momentum) indicator.

use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// Percent change of the close over `period` bars.
pub struct Momentum {
    period: usize,
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Momentum {
    fn id(&self) -> &str {
        "roc"
    }

    fn name(&self) -> &str {
        "Rate of Change"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let closes = series.closes();
        let mut roc = vec![None; closes.len()];
        if self.period > 0 {
            for i in self.period..closes.len() {
                let base = closes[i - self.period];
                // A zero base has no defined rate of change.
                if base > 0.0 {
                    roc[i] = Some((closes[i] / base - 1.0) * 100.0);
                }
            }
        }
        vec![(IndicatorKey::Momentum, Series::from_values(roc))]
    }
}
