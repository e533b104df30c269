//! Trading signals service module.
//!
//! Provides technical indicator calculations, discrete signal detection
//! and composite scoring.

pub mod detector;
pub mod indicators;
pub mod scoring;

pub use detector::SignalDetector;
pub use scoring::{CompositeScore, ScoringRule, ScoringTable};

use crate::config::IndicatorConfig;
use crate::types::{IndicatorCategory, IndicatorKey, IndicatorSet, PriceSeries, Series};
use indicators::all_indicators;
use tracing::debug;

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Category this indicator belongs to.
    fn category(&self) -> IndicatorCategory;

    /// Bars required before every output series has a defined value.
    fn min_periods(&self) -> usize;

    /// Compute output series aligned to `series`.
    /// Never fails: entries without enough history are undefined.
    fn calculate(&self, series: &PriceSeries) -> Vec<(IndicatorKey, Series)>;
}

/// Run every configured indicator over the series.
pub fn compute_indicators(series: &PriceSeries, config: &IndicatorConfig) -> IndicatorSet {
    let mut set = IndicatorSet::new(series.len());

    for indicator in all_indicators(config) {
        if series.len() < indicator.min_periods() {
            debug!(
                "{} needs {} bars, have {}: warm-up only",
                indicator.name(),
                indicator.min_periods(),
                series.len()
            );
        }
        for (key, values) in indicator.calculate(series) {
            set.insert(key, values);
        }
    }

    set
}
