use super::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the analysis pipeline. Injected at analyzer construction so
/// multiple analyzers with different settings can coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum similarity score for a historical incident to count as a match
    pub similarity_threshold: f64,

    /// Maximum number of historical matches reported per alert
    pub max_historical_matches: usize,

    /// Default log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            max_historical_matches: 3,
            log_level: "info".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration bounds.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(AnalysisError::InvalidConfig(format!(
                "similarity_threshold must be within [0.0, 1.0], got {}",
                self.similarity_threshold
            )));
        }

        if self.max_historical_matches == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_historical_matches must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
