//! Technical indicator implementations.
//!
//! Every indicator is a pure function of the price series that returns
//! series aligned to it, undefined through the warm-up region.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod ichimoku;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use ichimoku::Ichimoku;
pub use macd::Macd;
pub use momentum::Momentum;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;

use super::Indicator;
use crate::config::IndicatorConfig;

/// Get all indicators enabled by the configuration.
pub fn all_indicators(config: &IndicatorConfig) -> Vec<Box<dyn Indicator>> {
    let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();

    // Trend indicators
    for &period in &config.sma_periods {
        indicators.push(Box::new(Sma::new(period)));
    }
    for &period in &config.ema_periods {
        indicators.push(Box::new(Ema::new(period)));
    }
    indicators.push(Box::new(Macd::new(
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
    )));
    if let Some(ichimoku) = &config.ichimoku {
        indicators.push(Box::new(Ichimoku::from_config(ichimoku)));
    }

    // Momentum indicators
    indicators.push(Box::new(Rsi::new(config.rsi_period)));
    indicators.push(Box::new(Stochastic::new(
        config.stochastic_k,
        config.stochastic_d,
        config.stochastic_smooth_k,
    )));
    indicators.push(Box::new(Momentum::new(config.momentum_period)));

    // Volatility indicators
    indicators.push(Box::new(BollingerBands::new(
        config.bollinger_period,
        config.bollinger_std_dev,
    )));
    indicators.push(Box::new(Atr::new(config.atr_period)));

    indicators
}

/// Lift raw values into an all-defined series.
pub(crate) fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|v| Some(*v)).collect()
}

/// Rolling simple mean over `period` consecutive defined values.
pub(crate) fn sma(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let mut run = 0;
    for i in 0..values.len() {
        if values[i].is_none() {
            run = 0;
            continue;
        }
        run += 1;
        if run >= period {
            let sum: f64 = values[i + 1 - period..=i].iter().flatten().sum();
            out[i] = Some(sum / period as f64);
        }
    }
    out
}

/// Exponential mean seeded with the SMA of the first `period` values.
pub(crate) fn ema(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let multiplier = 2.0 / (period as f64 + 1.0);
    seeded(values, period, |prev, value| {
        (value - prev) * multiplier + prev
    })
}

/// Wilder's smoothing (RMA) seeded with the SMA of the first `period` values.
pub(crate) fn wilder(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let p = period as f64;
    seeded(values, period, |prev, value| (prev * (p - 1.0) + value) / p)
}

/// Recursive average that restarts whenever an input is undefined.
fn seeded<F>(values: &[Option<f64>], period: usize, step: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let mut run = 0;
    let mut prev: Option<f64> = None;
    for i in 0..values.len() {
        let Some(value) = values[i] else {
            run = 0;
            prev = None;
            continue;
        };
        run += 1;
        prev = match prev {
            Some(p) => Some(step(p, value)),
            None if run == period => {
                let sum: f64 = values[i + 1 - period..=i].iter().flatten().sum();
                Some(sum / period as f64)
            }
            None => None,
        };
        out[i] = prev;
    }
    out
}

/// Apply `f` to every full trailing window of `period` values.
pub(crate) fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for i in (period - 1)..values.len() {
        out[i] = Some(f(&values[i + 1 - period..=i]));
    }
    out
}

pub(crate) fn highest(window: &[f64]) -> f64 {
    window.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

pub(crate) fn lowest(window: &[f64]) -> f64 {
    window.iter().cloned().fold(f64::INFINITY, f64::min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_warm_up() {
        let values = defined(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sma(&values, 3), vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_sma_restarts_after_gap() {
        let values = vec![Some(1.0), None, Some(3.0), Some(5.0)];
        assert_eq!(sma(&values, 2), vec![None, None, None, Some(4.0)]);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let values = defined(&[2.0, 4.0, 6.0, 8.0]);
        let out = ema(&values, 3);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(4.0));
        // multiplier 0.5: (8 - 4) * 0.5 + 4
        assert_eq!(out[3], Some(6.0));
    }

    #[test]
    fn test_wilder_smoothing() {
        let values = defined(&[1.0, 1.0, 4.0]);
        let out = wilder(&values, 2);
        assert_eq!(out, vec![None, Some(1.0), Some(2.5)]);
    }

    #[test]
    fn test_rolling_short_input() {
        let out = rolling(&[1.0, 2.0], 3, highest);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn test_zero_period_is_undefined() {
        let values = defined(&[1.0, 2.0]);
        assert_eq!(sma(&values, 0), vec![None, None]);
        assert_eq!(ema(&values, 0), vec![None, None]);
        assert_eq!(rolling(&[1.0, 2.0], 0, lowest), vec![None, None]);
    }

    #[test]
    fn test_all_indicators_respects_ichimoku_toggle() {
        let mut config = IndicatorConfig::default();
        let with = all_indicators(&config).len();
        config.ichimoku = None;
        let without = all_indicators(&config).len();
        assert_eq!(with, without + 1);
    }
}
