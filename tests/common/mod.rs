//! Shared bar builders for integration tests.

#![allow(dead_code)]

use quantscope::{PriceBar, PriceSeries};

pub const DAY_MS: i64 = 86_400_000;

/// Bars with open = high = low = close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::new(1_700_000_000_000 + i as i64 * DAY_MS, c, c, c, c, 1_000.0))
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(bars_from_closes(closes)).unwrap()
}

/// `count` closes rising in equal steps from `from` to `to`.
pub fn linear_closes(count: usize, from: f64, to: f64) -> Vec<f64> {
    let step = (to - from) / (count - 1) as f64;
    (0..count).map(|i| from + step * i as f64).collect()
}

/// Deterministic zig-zag around a drifting level.
pub fn choppy_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let swing = if i % 2 == 0 { 1.5 } else { -1.5 };
            50.0 + i as f64 * 0.05 + swing * ((i % 7) as f64 / 7.0)
        })
        .collect()
}

/// Smooth oscillation around 100, with crossovers in both directions.
pub fn wave_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            100.0 + 8.0 * (t * 0.21).sin() + 3.0 * (t * 0.67).cos() + t * 0.02
        })
        .collect()
}
