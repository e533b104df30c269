use serde::{Deserialize, Serialize};

/// Coarse volatility bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    /// Not enough returns to estimate volatility.
    InsufficientData,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::InsufficientData => "Insufficient Data",
        }
    }
}

/// Return, volatility and drawdown statistics of the close series.
///
/// Percent fields are expressed in percent (12.5 means 12.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    /// Number of period returns the statistics were computed from.
    pub observations: usize,
    pub annualized_return_pct: Option<f64>,
    pub annualized_volatility_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    /// Largest peak-to-trough decline, zero or negative.
    pub max_drawdown_pct: Option<f64>,
    /// Lower-tail quantile of period returns.
    pub value_at_risk_pct: Option<f64>,
    pub tier: RiskTier,
}

impl RiskProfile {
    /// Profile with every metric undefined.
    pub fn insufficient(observations: usize) -> Self {
        Self {
            observations,
            annualized_return_pct: None,
            annualized_volatility_pct: None,
            sharpe_ratio: None,
            max_drawdown_pct: None,
            value_at_risk_pct: None,
            tier: RiskTier::InsufficientData,
        }
    }
}
