use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places used when presenting prices of one unit or more.
pub const PRICE_DISPLAY_DECIMALS: u32 = 2;

/// Upper bound on decimals for sub-unit prices.
pub const MAX_PRICE_DISPLAY_DECIMALS: u32 = 12;

/// Significant digits kept when a price is below one unit.
const SUB_UNIT_SIGNIFICANT_DIGITS: u32 = 4;

/// Decimal places needed to present `price` legibly.
///
/// Prices of one unit or more use [`PRICE_DISPLAY_DECIMALS`]. Smaller
/// prices keep four significant digits, so 0.00001234 is not shown as 0.00.
pub fn price_decimals(price: f64) -> u32 {
    let magnitude = price.abs();
    if !magnitude.is_finite() || magnitude == 0.0 || magnitude >= 1.0 {
        return PRICE_DISPLAY_DECIMALS;
    }
    let leading = (-magnitude.log10()).ceil() as u32;
    (leading + SUB_UNIT_SIGNIFICANT_DIGITS - 1)
        .clamp(PRICE_DISPLAY_DECIMALS, MAX_PRICE_DISPLAY_DECIMALS)
}

/// Round a value for display. Stored values keep full precision.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Discrete recommendation tier derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl RecommendationTier {
    /// Get display label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::StrongBuy => "Strong Buy",
            RecommendationTier::Buy => "Buy",
            RecommendationTier::Hold => "Hold",
            RecommendationTier::Sell => "Sell",
            RecommendationTier::StrongSell => "Strong Sell",
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            RecommendationTier::StrongBuy | RecommendationTier::StrongSell => Confidence::High,
            RecommendationTier::Buy | RecommendationTier::Sell => Confidence::Moderate,
            RecommendationTier::Hold => Confidence::Low,
        }
    }

    pub fn bias(&self) -> ScoreBias {
        match self {
            RecommendationTier::StrongBuy | RecommendationTier::Buy => ScoreBias::Positive,
            RecommendationTier::Hold => ScoreBias::Neutral,
            RecommendationTier::Sell | RecommendationTier::StrongSell => ScoreBias::Negative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Moderate => "Moderate",
            Confidence::High => "High",
        }
    }
}

/// Column of the allocation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBias {
    Positive,
    Neutral,
    Negative,
}

/// Suggested share of capital, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRange {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl fmt::Display for AllocationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max_pct == 0.0 {
            write!(f, "0%")
        } else {
            write!(f, "{}-{}%", self.min_pct, self.max_pct)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSide {
    /// Positive score: stops below, targets above.
    Long,
    /// Non-positive score: stops above, targets below.
    Short,
}

/// Where the stop distance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    Atr,
    PercentOfClose,
}

/// Entry, stop and target prices at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevels {
    pub side: PositionSide,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub distance: f64,
    pub distance_source: DistanceSource,
    /// Undefined when the distance collapses to zero.
    pub risk_reward: Option<f64>,
}

impl PriceLevels {
    /// Copy with every price rounded for display.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            side: self.side,
            entry: round_to(self.entry, decimals),
            stop_loss: round_to(self.stop_loss, decimals),
            take_profit_1: round_to(self.take_profit_1, decimals),
            take_profit_2: round_to(self.take_profit_2, decimals),
            distance: round_to(self.distance, decimals),
            distance_source: self.distance_source,
            risk_reward: self.risk_reward.map(|r| round_to(r, decimals)),
        }
    }
}

/// Final trade recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub tier: RecommendationTier,
    pub confidence: Confidence,
    /// Composite score the tier was chosen from.
    pub score: f64,
    pub strategy: String,
    pub allocation: AllocationRange,
    pub levels: PriceLevels,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = price_decimals(self.levels.entry) as usize;
        let levels = self.levels.rounded(prec as u32);
        writeln!(
            f,
            "{} (score {:+.1}, {} confidence)",
            self.tier.label(),
            self.score,
            self.confidence.label()
        )?;
        writeln!(f, "Strategy: {}", self.strategy)?;
        writeln!(f, "Allocation: {}", self.allocation)?;
        writeln!(
            f,
            "Entry {:.prec$} | Stop {:.prec$} | Target 1 {:.prec$} | Target 2 {:.prec$}",
            levels.entry,
            levels.stop_loss,
            levels.take_profit_1,
            levels.take_profit_2,
            prec = prec
        )?;
        match levels.risk_reward {
            Some(rr) => write!(f, "Risk/reward {:.2}", rr),
            None => write!(f, "Risk/reward n/a"),
        }
    }
}
