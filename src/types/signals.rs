use serde::{Deserialize, Serialize};

/// Direction of a signal or score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

impl SignalDirection {
    /// Direction implied by the sign of a weight. Zero has no direction.
    pub fn from_weight(weight: f64) -> Option<Self> {
        if weight > 0.0 {
            Some(SignalDirection::Bullish)
        } else if weight < 0.0 {
            Some(SignalDirection::Bearish)
        } else {
            None
        }
    }

    /// Get display label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "Buy",
            SignalDirection::Bearish => "Sell",
        }
    }

    /// +1 for bullish, -1 for bearish.
    pub fn sign(&self) -> f64 {
        match self {
            SignalDirection::Bullish => 1.0,
            SignalDirection::Bearish => -1.0,
        }
    }
}

/// A discrete event fired from the last two bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEvent {
    /// Rule that fired (e.g., "sma_crossover_9_21").
    pub rule: String,
    pub direction: SignalDirection,
    /// Human-readable explanation.
    pub rationale: String,
}

/// One applied entry of the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContribution {
    pub label: String,
    /// Signed weight; positive is bullish.
    pub weight: f64,
    pub direction: SignalDirection,
}

/// Overall reading of the signal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalStatus {
    BuyPotential,
    SellPotential,
    Neutral,
}

impl TechnicalStatus {
    /// Majority vote of signal directions.
    pub fn from_events(events: &[SignalEvent]) -> Self {
        let bullish = events
            .iter()
            .filter(|e| e.direction == SignalDirection::Bullish)
            .count();
        let bearish = events.len() - bullish;
        if bullish > bearish {
            TechnicalStatus::BuyPotential
        } else if bearish > bullish {
            TechnicalStatus::SellPotential
        } else {
            TechnicalStatus::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TechnicalStatus::BuyPotential => "Buy Potential",
            TechnicalStatus::SellPotential => "Sell Potential",
            TechnicalStatus::Neutral => "Neutral",
        }
    }
}

/// Price position relative to the Ichimoku cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    Up,
    Down,
    Sideways,
}

impl TrendState {
    pub fn label(&self) -> &'static str {
        match self {
            TrendState::Up => "Uptrend",
            TrendState::Down => "Downtrend",
            TrendState::Sideways => "Sideways",
        }
    }
}
