use serde::Serialize;

use super::{
    IndicatorSet, Recommendation, RiskProfile, ScoreContribution, SignalEvent, TechnicalStatus,
    TrendState,
};

/// Complete result bundle for one price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Number of bars analyzed.
    pub bars: usize,
    /// Timestamp (milliseconds) of the most recent bar.
    pub as_of: i64,
    pub last_close: f64,
    pub indicators: IndicatorSet,
    pub signals: Vec<SignalEvent>,
    pub status: TechnicalStatus,
    /// Ichimoku trend, if the cloud is defined on the last bar.
    pub trend: Option<TrendState>,
    /// Applied contributions sorted by descending weight.
    pub contributions: Vec<ScoreContribution>,
    pub composite_score: f64,
    pub risk: RiskProfile,
    pub recommendation: Recommendation,
}
