//! Ichimoku Cloud implementation.

use super::{highest, lowest, rolling};
use crate::config::IchimokuConfig;
use crate::services::signals::Indicator;
use crate::types::{IndicatorCategory, IndicatorKey, PriceSeries, Series, TrendState};

/// Ichimoku channel.
///
/// - Tenkan-sen (Conversion Line): (9-period high + 9-period low) / 2
/// - Kijun-sen (Base Line): (26-period high + 26-period low) / 2
/// - Senkou Span A: (Tenkan + Kijun) / 2, displaced 26 periods ahead
/// - Senkou Span B: (52-period high + 52-period low) / 2, displaced 26 periods ahead
///
/// Spans are stored at the bar they are plotted on, so the cloud value at
/// index `i` was computed from bar `i - displacement`.
#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan_period: usize,
    kijun_period: usize,
    senkou_b_period: usize,
    displacement: usize,
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::from_config(&IchimokuConfig::default())
    }
}

impl Ichimoku {
    pub fn from_config(config: &IchimokuConfig) -> Self {
        Self {
            tenkan_period: config.tenkan_period,
            kijun_period: config.kijun_period,
            senkou_b_period: config.senkou_b_period,
            displacement: config.displacement,
        }
    }

    /// Midpoint of the highest high and lowest low over each window.
    fn midpoint(high: &[f64], low: &[f64], period: usize) -> Vec<Option<f64>> {
        let highs = rolling(high, period, highest);
        let lows = rolling(low, period, lowest);
        highs
            .iter()
            .zip(lows.iter())
            .map(|(h, l)| Some(((*h)? + (*l)?) / 2.0))
            .collect()
    }

    fn displace(values: &[Option<f64>], by: usize) -> Vec<Option<f64>> {
        let mut out = vec![None; values.len()];
        for i in by..values.len() {
            out[i] = values[i - by];
        }
        out
    }

    /// Close position relative to the cloud on the last bar.
    pub fn trend(close: f64, span_a: Option<f64>, span_b: Option<f64>) -> Option<TrendState> {
        let (a, b) = (span_a?, span_b?);
        Some(if close > a && close > b {
            TrendState::Up
        } else if close < a && close < b {
            TrendState::Down
        } else {
            TrendState::Sideways
        })
    }
}

impl Indicator for Ichimoku {
    fn id(&self) -> &str {
        "ichimoku"
    }

    fn name(&self) -> &str {
        "Ichimoku"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.tenkan_period
            .max(self.kijun_period)
            .max(self.senkou_b_period)
            + self.displacement
    }

    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)> {
        let high = series.highs();
        let low = series.lows();

        let tenkan = Self::midpoint(&high, &low, self.tenkan_period);
        let kijun = Self::midpoint(&high, &low, self.kijun_period);
        let senkou_a: Vec<Option<f64>> = tenkan
            .iter()
            .zip(kijun.iter())
            .map(|(t, k)| Some(((*t)? + (*k)?) / 2.0))
            .collect();
        let senkou_b = Self::midpoint(&high, &low, self.senkou_b_period);

        vec![
            (IndicatorKey::Tenkan, Series::from_values(tenkan)),
            (IndicatorKey::Kijun, Series::from_values(kijun)),
            (
                IndicatorKey::SpanA,
                Series::from_values(Self::displace(&senkou_a, self.displacement)),
            ),
            (
                IndicatorKey::SpanB,
                Series::from_values(Self::displace(&senkou_b, self.displacement)),
            ),
        ]
    }
}
