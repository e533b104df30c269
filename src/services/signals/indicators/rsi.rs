//! Relative Strength Index (RSI) indicator.

use super::wilder;
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Averages use Wilder's smoothing. A window with no losses is 100.
pub struct Rsi {
    period: usize,
    name: String,
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("RSI ({})", period),
        }
    }

    /// Calculate the RSI series from closes.
    fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut gains = vec![None; closes.len()];
        let mut losses = vec![None; closes.len()];

        for i in 1..closes.len() {
            let change = closes[i] - closes[i - 1];
            gains[i] = Some(change.max(0.0));
            losses[i] = Some((-change).max(0.0));
        }

        let avg_gain = wilder(&gains, period);
        let avg_loss = wilder(&losses, period);

        avg_gain
            .iter()
            .zip(avg_loss.iter())
            .map(|(gain, loss)| {
                let (gain, loss) = ((*gain)?, (*loss)?);
                if loss == 0.0 {
                    return Some(100.0);
                }
                let rs = gain / loss;
                Some(100.0 - (100.0 / (1.0 + rs)))
            })
            .collect()
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let rsi = Self::calculate_rsi(&series.closes(), self.period);
        vec![(IndicatorKey::Rsi, Series::from_values(rsi))]
    }
}
