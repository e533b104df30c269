//! Composite score as a declarative table of weighted rules.
//!
//! Rules are grouped; within a group only the first rule that holds
//! contributes, so tiered bands (RSI < 30 before RSI < 40) never stack.
//! A rule whose inputs are undefined is skipped silently.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::detector::{approx_cmp, crossover};
use crate::config::ScoringConfig;
use crate::types::{
    IndicatorKey, IndicatorSet, PriceSeries, ScoreContribution, SignalDirection,
};

type Predicate = Box<dyn Fn(&IndicatorSet, f64) -> Option<bool> + Send + Sync>;

/// A weighted condition over the latest indicator values and close.
pub struct ScoringRule {
    group: &'static str,
    label: String,
    weight: f64,
    predicate: Predicate,
}

impl ScoringRule {
    pub fn new<F>(group: &'static str, label: impl Into<String>, weight: f64, predicate: F) -> Self
    where
        F: Fn(&IndicatorSet, f64) -> Option<bool> + Send + Sync + 'static,
    {
        Self {
            group,
            label: label.into(),
            weight,
            predicate: Box::new(predicate),
        }
    }

    pub fn group(&self) -> &'static str {
        self.group
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Signed weight; positive is bullish.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// `None` when an input is undefined.
    pub fn holds(&self, indicators: &IndicatorSet, close: f64) -> Option<bool> {
        (self.predicate)(indicators, close)
    }
}

impl fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringRule")
            .field("group", &self.group)
            .field("label", &self.label)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Sum of applied weights plus the entries that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    pub score: f64,
    /// Sorted by descending weight.
    pub contributions: Vec<ScoreContribution>,
}

/// Ordered list of scoring rules.
#[derive(Debug)]
pub struct ScoringTable {
    rules: Vec<ScoringRule>,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

/// `fast` vs `slow` on the last bar, with rounding noise treated as equal.
fn ordered(indicators: &IndicatorSet, fast: IndicatorKey, slow: IndicatorKey) -> Option<Ordering> {
    Some(approx_cmp(indicators.last(fast)?, indicators.last(slow)?))
}

fn crossed(
    indicators: &IndicatorSet,
    fast: IndicatorKey,
    slow: IndicatorKey,
) -> Option<SignalDirection> {
    let (prev_fast, cur_fast) = indicators.last_pair(fast)?;
    let (prev_slow, cur_slow) = indicators.last_pair(slow)?;
    crossover(prev_fast, prev_slow, cur_fast, cur_slow)
}

/// Like [`crossed`], but undefined history reads as undefined rather than
/// "no cross".
fn crossed_to(
    indicators: &IndicatorSet,
    fast: IndicatorKey,
    slow: IndicatorKey,
    direction: SignalDirection,
) -> Option<bool> {
    indicators.last_pair(fast)?;
    indicators.last_pair(slow)?;
    Some(crossed(indicators, fast, slow) == Some(direction))
}

impl ScoringTable {
    /// Build the default rule set from thresholds and weights.
    pub fn new(config: &ScoringConfig) -> Self {
        use IndicatorKey::*;
        use SignalDirection::{Bearish, Bullish};

        let c = config.clone();
        let (trend_fast, trend_slow) = (Sma(c.trend_pair.0), Sma(c.trend_pair.1));
        let (short_fast, short_slow) = (Sma(c.short_pair.0), Sma(c.short_pair.1));

        let mut rules = Vec::new();

        // Most extreme band first.
        let (extreme_low, extreme_high) = (c.rsi_extreme_oversold, c.rsi_extreme_overbought);
        let (low, high) = (c.rsi_oversold, c.rsi_overbought);
        rules.push(ScoringRule::new(
            "rsi",
            format!("RSI below {}", extreme_low),
            c.rsi_extreme_weight,
            move |ind, _| Some(ind.last(Rsi)? < extreme_low),
        ));
        rules.push(ScoringRule::new(
            "rsi",
            format!("RSI above {}", extreme_high),
            -c.rsi_extreme_weight,
            move |ind, _| Some(ind.last(Rsi)? > extreme_high),
        ));
        rules.push(ScoringRule::new(
            "rsi",
            format!("RSI below {}", low),
            c.rsi_weight,
            move |ind, _| Some(ind.last(Rsi)? < low),
        ));
        rules.push(ScoringRule::new(
            "rsi",
            format!("RSI above {}", high),
            -c.rsi_weight,
            move |ind, _| Some(ind.last(Rsi)? > high),
        ));

        rules.push(ScoringRule::new(
            "macd",
            "MACD crossed above signal",
            c.macd_cross_weight,
            |ind, _| crossed_to(ind, MacdLine, MacdSignal, Bullish),
        ));
        rules.push(ScoringRule::new(
            "macd",
            "MACD crossed below signal",
            -c.macd_cross_weight,
            |ind, _| crossed_to(ind, MacdLine, MacdSignal, Bearish),
        ));
        rules.push(ScoringRule::new(
            "macd",
            "MACD above signal",
            c.macd_trend_weight,
            |ind, _| Some(ordered(ind, MacdLine, MacdSignal)? == Ordering::Greater),
        ));
        rules.push(ScoringRule::new(
            "macd",
            "MACD below signal",
            -c.macd_trend_weight,
            |ind, _| Some(ordered(ind, MacdLine, MacdSignal)? == Ordering::Less),
        ));

        rules.push(ScoringRule::new(
            "bollinger",
            "Close below lower Bollinger band",
            c.bollinger_weight,
            |ind, close| Some(close < ind.last(BollingerLower)?),
        ));
        rules.push(ScoringRule::new(
            "bollinger",
            "Close above upper Bollinger band",
            -c.bollinger_weight,
            |ind, close| Some(close > ind.last(BollingerUpper)?),
        ));

        rules.push(ScoringRule::new(
            "price_vs_sma",
            format!("Close above SMA {}", c.trend_pair.0),
            c.ma_order_weight,
            move |ind, close| Some(approx_cmp(close, ind.last(trend_fast)?) == Ordering::Greater),
        ));
        rules.push(ScoringRule::new(
            "price_vs_sma",
            format!("Close below SMA {}", c.trend_pair.0),
            -c.ma_order_weight,
            move |ind, close| Some(approx_cmp(close, ind.last(trend_fast)?) == Ordering::Less),
        ));
        rules.push(ScoringRule::new(
            "short_order",
            format!("SMA {} above SMA {}", c.short_pair.0, c.short_pair.1),
            c.ma_order_weight,
            move |ind, _| Some(ordered(ind, short_fast, short_slow)? == Ordering::Greater),
        ));
        rules.push(ScoringRule::new(
            "short_order",
            format!("SMA {} below SMA {}", c.short_pair.0, c.short_pair.1),
            -c.ma_order_weight,
            move |ind, _| Some(ordered(ind, short_fast, short_slow)? == Ordering::Less),
        ));

        rules.push(ScoringRule::new(
            "trend_regime",
            format!("Golden cross regime (SMA {}/{})", c.trend_pair.0, c.trend_pair.1),
            c.cross_weight,
            move |ind, _| Some(ordered(ind, trend_fast, trend_slow)? == Ordering::Greater),
        ));
        rules.push(ScoringRule::new(
            "trend_regime",
            format!("Death cross regime (SMA {}/{})", c.trend_pair.0, c.trend_pair.1),
            -c.cross_weight,
            move |ind, _| Some(ordered(ind, trend_fast, trend_slow)? == Ordering::Less),
        ));

        // %K turning through %D inside an extreme zone.
        let (stoch_low, stoch_high) = (c.stochastic_oversold, c.stochastic_overbought);
        rules.push(ScoringRule::new(
            "stochastic",
            format!("Stochastic bullish turn below {}", stoch_low),
            c.stochastic_weight,
            move |ind, _| {
                let turned = crossed_to(ind, StochasticK, StochasticD, Bullish)?;
                Some(turned && ind.last(StochasticD)? < stoch_low)
            },
        ));
        rules.push(ScoringRule::new(
            "stochastic",
            format!("Stochastic bearish turn above {}", stoch_high),
            -c.stochastic_weight,
            move |ind, _| {
                let turned = crossed_to(ind, StochasticK, StochasticD, Bearish)?;
                Some(turned && ind.last(StochasticD)? > stoch_high)
            },
        ));

        rules.push(ScoringRule::new(
            "momentum",
            "Positive rate of change",
            c.momentum_weight,
            |ind, _| Some(ind.last(Momentum)? > 0.0),
        ));
        rules.push(ScoringRule::new(
            "momentum",
            "Negative rate of change",
            -c.momentum_weight,
            |ind, _| Some(ind.last(Momentum)? < 0.0),
        ));

        Self { rules }
    }

    pub fn from_rules(rules: Vec<ScoringRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    /// Score the last bar of `series`.
    pub fn evaluate(&self, indicators: &IndicatorSet, series: &PriceSeries) -> CompositeScore {
        let close = series.last().close;
        let mut fired: Vec<&'static str> = Vec::new();
        let mut contributions = Vec::new();

        for rule in &self.rules {
            if fired.contains(&rule.group) {
                continue;
            }
            if rule.holds(indicators, close) != Some(true) {
                continue;
            }
            let Some(direction) = SignalDirection::from_weight(rule.weight) else {
                continue;
            };
            fired.push(rule.group);
            contributions.push(ScoreContribution {
                label: rule.label.clone(),
                weight: rule.weight,
                direction,
            });
        }

        let score = contributions.iter().map(|c| c.weight).sum();
        contributions.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        CompositeScore {
            score,
            contributions,
        }
    }
}
