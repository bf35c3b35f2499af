pub mod analyzer;
pub mod causes;
pub mod config;
pub mod impact;
pub mod response;
pub mod similarity;

pub use analyzer::{AlertAnalyzer, AnalysisSummary};
pub use config::AnalyzerConfig;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur while building or running the analyzer
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Other error: {0}")]
    Other(String),
}
