//! Stochastic Oscillator indicator.

use super::{highest, lowest, sma};
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series};

/// %K when the window's high equals its low.
const FLAT_RANGE_K: f64 = 50.0;

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
/// %D = SMA of %K
///
/// Signals:
/// - Below 20: Oversold (bullish)
/// - Above 80: Overbought (bearish)
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    /// SMA applied to raw %K; 1 leaves it raw.
    smooth_k: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new(14, 3, 1)
    }
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize, smooth_k: usize) -> Self {
        Self {
            k_period,
            d_period,
            smooth_k: smooth_k.max(1),
        }
    }

    fn raw_k(series: &PriceSeries, period: usize) -> Vec<Option<f64>> {
        let bars = series.bars();
        let mut k_values = vec![None; bars.len()];
        if period == 0 || bars.len() < period {
            return k_values;
        }

        for i in (period - 1)..bars.len() {
            let window = &bars[(i + 1 - period)..=i];

            let lows: Vec<f64> = window.iter().map(|c| c.low).collect();
            let highs: Vec<f64> = window.iter().map(|c| c.high).collect();
            let lowest_low = lowest(&lows);
            let highest_high = highest(&highs);

            let k = if highest_high != lowest_low {
                ((bars[i].close - lowest_low) / (highest_high - lowest_low)) * 100.0
            } else {
                FLAT_RANGE_K
            };

            k_values[i] = Some(k);
        }

        k_values
    }
}

impl Indicator for Stochastic {
    fn id(&self) -> &str {
        "stochastic"
    }

    fn name(&self) -> &str {
        "Stochastic"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        (self.k_period + self.smooth_k + self.d_period).saturating_sub(2)
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let raw = Self::raw_k(series, self.k_period);
        let k = if self.smooth_k > 1 {
            sma(&raw, self.smooth_k)
        } else {
            raw
        };
        let d = sma(&k, self.d_period);

        vec![
            (IndicatorKey::StochasticK, Series::from_values(k)),
            (IndicatorKey::StochasticD, Series::from_values(d)),
        ]
    }
}
