//! Quantscope - technical analysis and trade recommendations for a single
//! OHLCV price series.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use services::Analyzer;
pub use types::*;
