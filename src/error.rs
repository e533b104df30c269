use thiserror::Error;

/// Analysis error types.
///
/// Short or degenerate series are not errors: those surface as undefined
/// values inside the result. Only absent or structurally broken input fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No price data supplied")]
    NoData,

    #[error("Bars out of order at index {index}: timestamp {current} does not follow {previous}")]
    OutOfOrder {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AnalysisError::NoData.to_string(), "No price data supplied");

        let err = AnalysisError::OutOfOrder {
            index: 3,
            previous: 2000,
            current: 1000,
        };
        assert_eq!(
            err.to_string(),
            "Bars out of order at index 3: timestamp 1000 does not follow 2000"
        );

        let err = AnalysisError::InvalidBar {
            index: 0,
            reason: "high below low".to_string(),
        };
        assert!(err.to_string().contains("high below low"));
    }
}
