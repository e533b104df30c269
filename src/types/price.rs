use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// OHLCV bar for a single period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Unix timestamp (milliseconds) of the period open.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PriceBar {
    /// Create a bar from its raw fields.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar timestamp as a UTC datetime, if it is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    fn check(&self, index: usize) -> Result<()> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidBar {
                    index,
                    reason: format!("{} is {}", name, value),
                });
            }
        }
        if self.high < self.low {
            return Err(AnalysisError::InvalidBar {
                index,
                reason: format!("high {} below low {}", self.high, self.low),
            });
        }
        Ok(())
    }
}

/// Chronologically ordered, validated price history for one instrument.
///
/// Construction is the only place ordering is checked; every consumer can
/// rely on strictly increasing timestamps and at least one bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate bars and build a series.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(AnalysisError::NoData);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.check(index)?;
            if index > 0 {
                let previous = bars[index - 1].time;
                if bar.time <= previous {
                    return Err(AnalysisError::OutOfOrder {
                        index,
                        previous,
                        current: bar.time,
                    });
                }
            }
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn last(&self) -> &PriceBar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, close: f64) -> PriceBar {
        PriceBar::new(time, close, close + 1.0, close - 1.0, close, 100.0)
    }

    #[test]
    fn test_series_rejects_empty() {
        assert_eq!(PriceSeries::new(vec![]), Err(AnalysisError::NoData));
    }

    #[test]
    fn test_series_rejects_duplicate_timestamp() {
        let result = PriceSeries::new(vec![bar(1000, 10.0), bar(1000, 11.0)]);
        assert_eq!(
            result,
            Err(AnalysisError::OutOfOrder {
                index: 1,
                previous: 1000,
                current: 1000
            })
        );
    }

    #[test]
    fn test_series_rejects_descending() {
        let result = PriceSeries::new(vec![bar(2000, 10.0), bar(3000, 10.0), bar(1000, 11.0)]);
        assert!(matches!(result, Err(AnalysisError::OutOfOrder { index: 2, .. })));
    }

    #[test]
    fn test_series_rejects_nan_close() {
        let result = PriceSeries::new(vec![bar(1000, 10.0), bar(2000, f64::NAN)]);
        assert!(matches!(result, Err(AnalysisError::InvalidBar { index: 1, .. })));
    }

    #[test]
    fn test_series_rejects_inverted_range() {
        let mut b = bar(1000, 10.0);
        b.high = 5.0;
        let result = PriceSeries::new(vec![b]);
        assert!(matches!(result, Err(AnalysisError::InvalidBar { index: 0, .. })));
    }

    #[test]
    fn test_series_accessors() {
        let series = PriceSeries::new(vec![bar(1000, 10.0), bar(2000, 12.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.last().close, 12.0);
        assert_eq!(series.closes(), vec![10.0, 12.0]);
        assert_eq!(series.highs(), vec![11.0, 13.0]);
        assert_eq!(series.lows(), vec![9.0, 11.0]);
    }

    #[test]
    fn test_bar_datetime() {
        let b = bar(1_700_000_000_000, 10.0);
        assert_eq!(b.datetime().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_bar_volume_defaults_when_missing() {
        let json = r#"{"time":1,"open":1.0,"high":2.0,"low":0.5,"close":1.5}"#;
        let b: PriceBar = serde_json::from_str(json).unwrap();
        assert_eq!(b.volume, 0.0);
    }
}
