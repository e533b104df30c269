use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Category of a technical indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
}

impl IndicatorCategory {
    /// Get display name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorCategory::Trend => "Trend",
            IndicatorCategory::Momentum => "Momentum",
            IndicatorCategory::Volatility => "Volatility",
        }
    }
}

/// Numeric series aligned to a price series.
///
/// Entries are `None` until enough history has accumulated. Non-finite
/// numbers are never stored; they become `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<Option<f64>>);

impl Series {
    /// A series of `len` undefined entries.
    pub fn undefined(len: usize) -> Self {
        Self(vec![None; len])
    }

    pub fn from_values(values: Vec<Option<f64>>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Value on the most recent bar.
    pub fn last(&self) -> Option<f64> {
        self.0.last().copied().flatten()
    }

    /// `(previous, current)` when both of the last two entries are defined.
    pub fn last_pair(&self) -> Option<(f64, f64)> {
        let n = self.0.len();
        if n < 2 {
            return None;
        }
        Some((self.0[n - 2]?, self.0[n - 1]?))
    }

    /// Index of the first defined entry.
    pub fn first_defined(&self) -> Option<usize> {
        self.0.iter().position(|v| v.is_some())
    }

    pub fn defined_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_all_undefined(&self) -> bool {
        self.0.iter().all(|v| v.is_none())
    }
}

/// Identifier of one derived series in an [`IndicatorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorKey {
    Sma(usize),
    Ema(usize),
    Rsi,
    MacdLine,
    MacdSignal,
    MacdHistogram,
    BollingerUpper,
    BollingerMiddle,
    BollingerLower,
    StochasticK,
    StochasticD,
    Atr,
    Momentum,
    Tenkan,
    Kijun,
    SpanA,
    SpanB,
}

impl IndicatorKey {
    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKey::Sma(_)
            | IndicatorKey::Ema(_)
            | IndicatorKey::MacdLine
            | IndicatorKey::MacdSignal
            | IndicatorKey::MacdHistogram
            | IndicatorKey::Tenkan
            | IndicatorKey::Kijun
            | IndicatorKey::SpanA
            | IndicatorKey::SpanB => IndicatorCategory::Trend,
            IndicatorKey::Rsi
            | IndicatorKey::StochasticK
            | IndicatorKey::StochasticD
            | IndicatorKey::Momentum => IndicatorCategory::Momentum,
            IndicatorKey::BollingerUpper
            | IndicatorKey::BollingerMiddle
            | IndicatorKey::BollingerLower
            | IndicatorKey::Atr => IndicatorCategory::Volatility,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKey::Sma(w) => write!(f, "sma_{}", w),
            IndicatorKey::Ema(w) => write!(f, "ema_{}", w),
            IndicatorKey::Rsi => write!(f, "rsi"),
            IndicatorKey::MacdLine => write!(f, "macd"),
            IndicatorKey::MacdSignal => write!(f, "macd_signal"),
            IndicatorKey::MacdHistogram => write!(f, "macd_histogram"),
            IndicatorKey::BollingerUpper => write!(f, "bb_upper"),
            IndicatorKey::BollingerMiddle => write!(f, "bb_middle"),
            IndicatorKey::BollingerLower => write!(f, "bb_lower"),
            IndicatorKey::StochasticK => write!(f, "stoch_k"),
            IndicatorKey::StochasticD => write!(f, "stoch_d"),
            IndicatorKey::Atr => write!(f, "atr"),
            IndicatorKey::Momentum => write!(f, "roc"),
            IndicatorKey::Tenkan => write!(f, "tenkan"),
            IndicatorKey::Kijun => write!(f, "kijun"),
            IndicatorKey::SpanA => write!(f, "span_a"),
            IndicatorKey::SpanB => write!(f, "span_b"),
        }
    }
}

/// All derived series for one price series, each of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    len: usize,
    series: BTreeMap<IndicatorKey, Series>,
}

impl IndicatorSet {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            series: BTreeMap::new(),
        }
    }

    /// Length of the underlying price series.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn insert(&mut self, key: IndicatorKey, series: Series) {
        debug_assert_eq!(series.len(), self.len, "{} is not aligned", key);
        self.series.insert(key, series);
    }

    pub fn get(&self, key: IndicatorKey) -> Option<&Series> {
        self.series.get(&key)
    }

    /// Value of `key` on the most recent bar.
    pub fn last(&self, key: IndicatorKey) -> Option<f64> {
        self.get(key)?.last()
    }

    /// `(previous, current)` values of `key` when both are defined.
    pub fn last_pair(&self, key: IndicatorKey) -> Option<(f64, f64)> {
        self.get(key)?.last_pair()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IndicatorKey, &Series)> {
        self.series.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &IndicatorKey> {
        self.series.keys()
    }
}

impl Serialize for IndicatorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.series.len()))?;
        for (key, series) in &self.series {
            map.serialize_entry(&key.to_string(), series)?;
        }
        map.end()
    }
}
