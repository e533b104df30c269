//! Discrete signal detection from the last two bars.

use std::cmp::Ordering;

use crate::config::SignalConfig;
use crate::types::{IndicatorKey, IndicatorSet, PriceSeries, SignalDirection, SignalEvent};

/// Relative tolerance under which two values compare equal.
pub const COMPARE_EPSILON: f64 = 1e-9;

/// Compare with a relative tolerance so rounding noise reads as equality.
pub fn approx_cmp(a: f64, b: f64) -> Ordering {
    let tolerance = COMPARE_EPSILON * a.abs().max(b.abs());
    if (a - b).abs() <= tolerance {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Direction of a crossover between two consecutive observations.
///
/// Bullish when fast was at or below slow and is now above; bearish for the
/// mirror case. Both cannot hold at once.
pub fn crossover(prev_fast: f64, prev_slow: f64, fast: f64, slow: f64) -> Option<SignalDirection> {
    match (approx_cmp(prev_fast, prev_slow), approx_cmp(fast, slow)) {
        (Ordering::Less | Ordering::Equal, Ordering::Greater) => Some(SignalDirection::Bullish),
        (Ordering::Greater | Ordering::Equal, Ordering::Less) => Some(SignalDirection::Bearish),
        _ => None,
    }
}

/// One detection rule.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalRule {
    /// `fast` crossing `slow`.
    Crossover {
        rule: String,
        fast_label: String,
        slow_label: String,
        fast: IndicatorKey,
        slow: IndicatorKey,
    },
    /// Oscillator below `oversold` or above `overbought`.
    Threshold {
        rule: String,
        label: String,
        key: IndicatorKey,
        oversold: f64,
        overbought: f64,
    },
    /// Close outside the Bollinger Bands.
    BandBreach,
    /// %K (and %D when strict) beyond the thresholds.
    Stochastic {
        oversold: f64,
        overbought: f64,
        strict: bool,
    },
}

impl SignalRule {
    /// Evaluate against the last two bars. `None` when nothing fired or an
    /// input is undefined.
    fn evaluate(&self, indicators: &IndicatorSet, closes: Option<(f64, f64)>) -> Option<SignalEvent> {
        match self {
            SignalRule::Crossover {
                rule,
                fast_label,
                slow_label,
                fast,
                slow,
            } => {
                let (prev_fast, cur_fast) = indicators.last_pair(*fast)?;
                let (prev_slow, cur_slow) = indicators.last_pair(*slow)?;
                let direction = crossover(prev_fast, prev_slow, cur_fast, cur_slow)?;
                let verb = match direction {
                    SignalDirection::Bullish => "above",
                    SignalDirection::Bearish => "below",
                };
                Some(event(
                    rule,
                    direction,
                    format!("{} crossed {} {}", fast_label, verb, slow_label),
                ))
            }
            SignalRule::Threshold {
                rule,
                label,
                key,
                oversold,
                overbought,
            } => {
                let (_, value) = indicators.last_pair(*key)?;
                if value < *oversold {
                    Some(event(
                        rule,
                        SignalDirection::Bullish,
                        format!("{} oversold ({:.1})", label, value),
                    ))
                } else if value > *overbought {
                    Some(event(
                        rule,
                        SignalDirection::Bearish,
                        format!("{} overbought ({:.1})", label, value),
                    ))
                } else {
                    None
                }
            }
            SignalRule::BandBreach => {
                let (_, close) = closes?;
                let (_, lower) = indicators.last_pair(IndicatorKey::BollingerLower)?;
                let (_, upper) = indicators.last_pair(IndicatorKey::BollingerUpper)?;
                if close < lower {
                    Some(event(
                        "bollinger_breach",
                        SignalDirection::Bullish,
                        format!("Close {:.2} below lower band {:.2}", close, lower),
                    ))
                } else if close > upper {
                    Some(event(
                        "bollinger_breach",
                        SignalDirection::Bearish,
                        format!("Close {:.2} above upper band {:.2}", close, upper),
                    ))
                } else {
                    None
                }
            }
            SignalRule::Stochastic {
                oversold,
                overbought,
                strict,
            } => {
                let (_, k) = indicators.last_pair(IndicatorKey::StochasticK)?;
                let d = if *strict {
                    Some(indicators.last_pair(IndicatorKey::StochasticD)?.1)
                } else {
                    None
                };
                let below = k < *oversold && d.map_or(true, |d| d < *oversold);
                let above = k > *overbought && d.map_or(true, |d| d > *overbought);
                if below {
                    Some(event(
                        "stochastic",
                        SignalDirection::Bullish,
                        format!("Stochastic oversold (%K {:.1})", k),
                    ))
                } else if above {
                    Some(event(
                        "stochastic",
                        SignalDirection::Bearish,
                        format!("Stochastic overbought (%K {:.1})", k),
                    ))
                } else {
                    None
                }
            }
        }
    }
}

fn event(rule: &str, direction: SignalDirection, rationale: String) -> SignalEvent {
    SignalEvent {
        rule: rule.to_string(),
        direction,
        rationale,
    }
}

/// Emits signal events from the current and previous bar only.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    rules: Vec<SignalRule>,
}

impl SignalDetector {
    pub fn new(config: &SignalConfig) -> Self {
        let mut rules: Vec<SignalRule> = config
            .crossover_pairs
            .iter()
            .map(|&(fast, slow)| SignalRule::Crossover {
                rule: format!("sma_cross_{}_{}", fast, slow),
                fast_label: format!("SMA {}", fast),
                slow_label: format!("SMA {}", slow),
                fast: IndicatorKey::Sma(fast),
                slow: IndicatorKey::Sma(slow),
            })
            .collect();

        rules.push(SignalRule::Threshold {
            rule: "rsi".to_string(),
            label: "RSI".to_string(),
            key: IndicatorKey::Rsi,
            oversold: config.rsi_oversold,
            overbought: config.rsi_overbought,
        });
        rules.push(SignalRule::Crossover {
            rule: "macd_cross".to_string(),
            fast_label: "MACD".to_string(),
            slow_label: "signal line".to_string(),
            fast: IndicatorKey::MacdLine,
            slow: IndicatorKey::MacdSignal,
        });
        rules.push(SignalRule::BandBreach);
        rules.push(SignalRule::Stochastic {
            oversold: config.stochastic_oversold,
            overbought: config.stochastic_overbought,
            strict: config.stochastic_strict,
        });
        rules.push(SignalRule::Crossover {
            rule: "ichimoku_cross".to_string(),
            fast_label: "Tenkan-sen".to_string(),
            slow_label: "Kijun-sen".to_string(),
            fast: IndicatorKey::Tenkan,
            slow: IndicatorKey::Kijun,
        });

        Self { rules }
    }

    pub fn rules(&self) -> &[SignalRule] {
        &self.rules
    }

    /// Evaluate every rule; rules with undefined inputs are skipped.
    pub fn detect(&self, indicators: &IndicatorSet, series: &PriceSeries) -> Vec<SignalEvent> {
        let bars = series.bars();
        let closes = (bars.len() >= 2)
            .then(|| (bars[bars.len() - 2].close, bars[bars.len() - 1].close));

        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(indicators, closes))
            .collect()
    }
}

impl Default for SignalDetector {
    fn default() -> Self {
        Self::new(&SignalConfig::default())
    }
}
