use std::env;

/// Ichimoku channel periods.
#[derive(Debug, Clone, PartialEq)]
pub struct IchimokuConfig {
    /// Conversion line period (default: 9).
    pub tenkan_period: usize,
    /// Base line period (default: 26).
    pub kijun_period: usize,
    /// Leading span B period (default: 52).
    pub senkou_b_period: usize,
    /// Bars the leading spans are displaced forward (default: 26).
    pub displacement: usize,
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self {
            tenkan_period: 9,
            kijun_period: 26,
            senkou_b_period: 52,
            displacement: 26,
        }
    }
}

/// Lookback windows for the indicator engine.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    /// Band width in standard deviations.
    pub bollinger_std_dev: f64,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    /// SMA smoothing applied to raw %K (1 = raw).
    pub stochastic_smooth_k: usize,
    pub atr_period: usize,
    /// Rate-of-change lookback used as short-horizon momentum.
    pub momentum_period: usize,
    /// Disabled when `None`.
    pub ichimoku: Option<IchimokuConfig>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_periods: vec![9, 20, 21, 50],
            ema_periods: vec![12, 26],
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            stochastic_k: 14,
            stochastic_d: 3,
            stochastic_smooth_k: 1,
            atr_period: 14,
            momentum_period: 5,
            ichimoku: Some(IchimokuConfig::default()),
        }
    }
}

/// Thresholds for discrete signal events.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// (fast, slow) SMA periods checked for crossovers.
    pub crossover_pairs: Vec<(usize, usize)>,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    /// Require %D beyond the threshold as well as %K.
    pub stochastic_strict: bool,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            crossover_pairs: vec![(9, 21), (20, 50)],
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            stochastic_strict: true,
        }
    }
}

/// Weights and tier thresholds of the composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub rsi_extreme_oversold: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub rsi_extreme_overbought: f64,
    pub rsi_extreme_weight: f64,
    pub rsi_weight: f64,
    pub macd_cross_weight: f64,
    /// MACD above/below signal without a fresh cross.
    pub macd_trend_weight: f64,
    pub bollinger_weight: f64,
    /// (fast, slow) SMA periods for the golden/death cross regime.
    /// Close is also ordered against the fast average.
    pub trend_pair: (usize, usize),
    /// (fast, slow) SMA periods for short-term ordering.
    pub short_pair: (usize, usize),
    pub ma_order_weight: f64,
    pub cross_weight: f64,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    pub stochastic_weight: f64,
    pub momentum_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rsi_extreme_oversold: 30.0,
            rsi_oversold: 40.0,
            rsi_overbought: 60.0,
            rsi_extreme_overbought: 70.0,
            rsi_extreme_weight: 2.0,
            rsi_weight: 1.0,
            macd_cross_weight: 2.0,
            macd_trend_weight: 0.5,
            bollinger_weight: 1.5,
            trend_pair: (20, 50),
            short_pair: (9, 21),
            ma_order_weight: 1.0,
            cross_weight: 1.5,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            stochastic_weight: 1.5,
            momentum_weight: 1.0,
        }
    }
}

/// Risk statistics settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Periods per year used for annualization.
    pub trading_days: f64,
    /// Annual risk-free rate as a fraction (0.10 = 10%).
    pub risk_free_rate: f64,
    /// Annualized volatility (percent) below which risk is Low.
    pub low_volatility_pct: f64,
    /// Annualized volatility (percent) below which risk is Moderate.
    pub moderate_volatility_pct: f64,
    /// Confidence level of the value-at-risk quantile.
    pub var_confidence: f64,
    /// Annualized volatility (percent) at or below which returns count as
    /// constant. Absorbs rounding noise in compounding series.
    pub zero_volatility_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            trading_days: 252.0,
            risk_free_rate: 0.10,
            low_volatility_pct: 20.0,
            moderate_volatility_pct: 35.0,
            var_confidence: 0.95,
            zero_volatility_pct: 1e-9,
        }
    }
}

/// Score bands and price level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationConfig {
    /// |score| at or beyond which the tier is Strong.
    pub strong_score: f64,
    /// |score| at or beyond which the tier leaves Hold.
    pub score: f64,
    /// Tolerance applied at band edges.
    pub score_epsilon: f64,
    /// Stop distance in ATRs.
    pub atr_multiplier: f64,
    /// Stop distance as percent of close when ATR is unusable.
    pub fallback_distance_pct: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            strong_score: 5.0,
            score: 2.0,
            score_epsilon: 1e-9,
            atr_multiplier: 2.0,
            fallback_distance_pct: 2.0,
        }
    }
}

/// Read-only configuration shared by every analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub signals: SignalConfig,
    pub scoring: ScoringConfig,
    pub risk: RiskConfig,
    pub recommendation: RecommendationConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v == "true" || v == "1")
}

impl AnalysisConfig {
    /// Defaults overridden from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rate) = env_parse("QUANT_RISK_FREE_RATE") {
            config.risk.risk_free_rate = rate;
        }
        if let Some(days) = env_parse::<f64>("QUANT_TRADING_DAYS").filter(|d| *d > 0.0) {
            config.risk.trading_days = days;
        }
        if let Some(pct) = env_parse("QUANT_VOL_LOW_PCT") {
            config.risk.low_volatility_pct = pct;
        }
        if let Some(pct) = env_parse("QUANT_VOL_MODERATE_PCT") {
            config.risk.moderate_volatility_pct = pct;
        }
        if let Some(mult) = env_parse("QUANT_ATR_MULTIPLIER") {
            config.recommendation.atr_multiplier = mult;
        }
        if let Some(pct) = env_parse("QUANT_FALLBACK_DISTANCE_PCT") {
            config.recommendation.fallback_distance_pct = pct;
        }
        if let Some(strict) = env_flag("QUANT_STOCH_STRICT") {
            config.signals.stochastic_strict = strict;
        }
        if let Some(enabled) = env_flag("QUANT_ICHIMOKU") {
            config.indicators.ichimoku = enabled.then(IchimokuConfig::default);
        }

        config
    }
}
