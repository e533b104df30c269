//! End-to-end analysis of one price series.

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::services::recommendation::RecommendationEngine;
use crate::services::risk::RiskAnalyzer;
use crate::services::signals::indicators::Ichimoku;
use crate::services::signals::{compute_indicators, SignalDetector, ScoringTable};
use crate::types::{Analysis, IndicatorKey, PriceBar, PriceSeries, TechnicalStatus};

/// Runs the indicator, signal, scoring, risk and recommendation stages.
///
/// Holds only read-only configuration, so one analyzer can be shared
/// across threads and series.
pub struct Analyzer {
    config: AnalysisConfig,
    detector: SignalDetector,
    scoring: ScoringTable,
    risk: RiskAnalyzer,
    recommendation: RecommendationEngine,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            detector: SignalDetector::new(&config.signals),
            scoring: ScoringTable::new(&config.scoring),
            risk: RiskAnalyzer::new(config.risk.clone()),
            recommendation: RecommendationEngine::new(config.recommendation.clone()),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate raw bars and analyze them.
    pub fn analyze_bars(&self, bars: Vec<PriceBar>) -> Result<Analysis> {
        let series = PriceSeries::new(bars).map_err(|e| {
            warn!("Rejected price series: {}", e);
            e
        })?;
        Ok(self.analyze(&series))
    }

    pub fn analyze(&self, series: &PriceSeries) -> Analysis {
        let last = series.last();
        let indicators = compute_indicators(series, &self.config.indicators);

        let signals = self.detector.detect(&indicators, series);
        let status = TechnicalStatus::from_events(&signals);
        let trend = Ichimoku::trend(
            last.close,
            indicators.last(IndicatorKey::SpanA),
            indicators.last(IndicatorKey::SpanB),
        );
        debug!("{} signal(s), status {}", signals.len(), status.label());

        let composite = self.scoring.evaluate(&indicators, series);
        let risk = self.risk.analyze(series);
        let recommendation = self.recommendation.recommend(
            composite.score,
            &risk,
            last.close,
            indicators.last(IndicatorKey::Atr),
        );

        info!(
            "Analyzed {} bars: score {:+.2}, {} ({} risk)",
            series.len(),
            composite.score,
            recommendation.tier.label(),
            risk.tier.label()
        );

        Analysis {
            bars: series.len(),
            as_of: last.time,
            last_close: last.close,
            indicators,
            signals,
            status,
            trend,
            contributions: composite.contributions,
            composite_score: composite.score,
            risk,
            recommendation,
        }
    }
}
