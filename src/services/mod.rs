pub mod analyzer;
pub mod recommendation;
pub mod risk;
pub mod signals;

pub use analyzer::Analyzer;
pub use recommendation::{allocation_for, AllocationCell, RecommendationEngine};
pub use risk::RiskAnalyzer;
pub use signals::{compute_indicators, CompositeScore, Indicator, ScoringTable, SignalDetector};
