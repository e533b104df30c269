//! Turns a composite score and risk profile into a recommendation.

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::types::{
    AllocationRange, DistanceSource, PositionSide, PriceLevels, Recommendation,
    RecommendationTier, RiskProfile, RiskTier, ScoreBias,
};

/// One cell of the allocation table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationCell {
    pub strategy: &'static str,
    pub min_pct: f64,
    pub max_pct: f64,
}

const fn cell(strategy: &'static str, min_pct: f64, max_pct: f64) -> AllocationCell {
    AllocationCell {
        strategy,
        min_pct,
        max_pct,
    }
}

/// Rows: Low, Moderate, High risk. Columns: positive, neutral, negative bias.
const ALLOCATION_TABLE: [[AllocationCell; 3]; 3] = [
    [
        cell("Build a core position; low volatility supports a larger allocation", 15.0, 25.0),
        cell("Hold a starter position and wait for confirmation", 5.0, 10.0),
        cell("Reduce exposure; keep at most a residual position", 0.0, 5.0),
    ],
    [
        cell("Enter in tranches and respect the stop", 10.0, 15.0),
        cell("Keep a small position and monitor signals", 3.0, 7.0),
        cell("Trim exposure and tighten stops", 0.0, 3.0),
    ],
    [
        cell("Speculative position only, with a strict stop", 3.0, 7.0),
        cell("Stay on the sidelines or keep a token position", 0.0, 3.0),
        cell("Avoid the instrument", 0.0, 0.0),
    ],
];

/// Look up the allocation cell for a risk tier and score bias.
///
/// Without enough data to judge volatility the High-risk row applies.
pub fn allocation_for(tier: RiskTier, bias: ScoreBias) -> AllocationCell {
    let row = match tier {
        RiskTier::Low => 0,
        RiskTier::Moderate => 1,
        RiskTier::High | RiskTier::InsufficientData => 2,
    };
    let column = match bias {
        ScoreBias::Positive => 0,
        ScoreBias::Neutral => 1,
        ScoreBias::Negative => 2,
    };
    ALLOCATION_TABLE[row][column]
}

/// Selects tier, allocation and price levels.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Score bands, most extreme first. Edges are inclusive within
    /// `score_epsilon`.
    pub fn tier(&self, score: f64) -> RecommendationTier {
        let eps = self.config.score_epsilon;
        let strong = self.config.strong_score;
        let normal = self.config.score;

        if score >= strong - eps {
            RecommendationTier::StrongBuy
        } else if score >= normal - eps {
            RecommendationTier::Buy
        } else if score > -normal + eps {
            RecommendationTier::Hold
        } else if score >= -strong - eps {
            RecommendationTier::Sell
        } else {
            RecommendationTier::StrongSell
        }
    }

    /// Stop and target levels around `close`.
    ///
    /// Distance is `atr_multiplier` ATRs; when ATR is undefined or not
    /// positive it falls back to a percentage of the close.
    pub fn price_levels(&self, close: f64, atr: Option<f64>, score: f64) -> PriceLevels {
        let (distance, distance_source) = match atr {
            Some(atr) if atr > 0.0 => (self.config.atr_multiplier * atr, DistanceSource::Atr),
            _ => (
                close * self.config.fallback_distance_pct / 100.0,
                DistanceSource::PercentOfClose,
            ),
        };

        let side = if score > 0.0 {
            PositionSide::Long
        } else {
            PositionSide::Short
        };
        let sign = match side {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        };

        let stop_loss = close - sign * distance;
        let take_profit_1 = close + sign * distance;
        let take_profit_2 = close + sign * 2.0 * distance;
        let risk = close - stop_loss;
        let risk_reward = if risk == 0.0 {
            None
        } else {
            Some((take_profit_1 - close) / risk)
        };

        PriceLevels {
            side,
            entry: close,
            stop_loss,
            take_profit_1,
            take_profit_2,
            distance,
            distance_source,
            risk_reward,
        }
    }

    pub fn recommend(
        &self,
        score: f64,
        risk: &RiskProfile,
        close: f64,
        atr: Option<f64>,
    ) -> Recommendation {
        let tier = self.tier(score);
        let cell = allocation_for(risk.tier, tier.bias());
        let levels = self.price_levels(close, atr, score);
        if levels.distance_source == DistanceSource::PercentOfClose {
            debug!("ATR unusable, stop distance from {}% of close", self.config.fallback_distance_pct);
        }

        Recommendation {
            tier,
            confidence: tier.confidence(),
            score,
            strategy: cell.strategy.to_string(),
            allocation: AllocationRange {
                min_pct: cell.min_pct,
                max_pct: cell.max_pct,
            },
            levels,
        }
    }
}
