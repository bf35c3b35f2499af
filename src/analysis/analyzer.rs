//! The alert analyzer: orchestrates cause identification, impact assessment
//! and response generation into one report.

use super::causes::{self, HISTORICAL_MARKER};
use super::config::AnalyzerConfig;
use super::{impact, response, AnalysisResult};
use crate::knowledge::{Incident, KnowledgeBase};
use crate::lexicon::{default_error_codes, ERROR_CODE_PATTERNS};
use crate::report::tagged;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info};

/// Structured view of an analysis for programmatic consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub analysis_id: String,
    pub severity: String,
    pub affected_systems: Vec<String>,
    pub cause_count: usize,
    pub has_historical_match: bool,
    pub error_codes: Vec<String>,
    /// RFC 3339 timestamp of when the summary was produced
    pub timestamp: String,
}

/// Rule-based alert analyzer. Each `analyze_alert` call is stateless given
/// the current knowledge-base and error-code snapshot; the tables are
/// mutable through the explicit update calls and visible to subsequent
/// analyses on the same instance.
pub struct AlertAnalyzer {
    knowledge_base: KnowledgeBase,
    error_codes: HashMap<String, String>,
    config: AnalyzerConfig,
    code_patterns: Vec<Regex>,
}

impl AlertAnalyzer {
    /// Analyzer with default configuration, seeded knowledge base and
    /// built-in error-code mapping.
    pub fn new() -> AnalysisResult<Self> {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Analyzer with an explicit configuration. Invalid settings are
    /// rejected here rather than silently accepted.
    pub fn with_config(config: AnalyzerConfig) -> AnalysisResult<Self> {
        config.validate()?;

        let code_patterns = ERROR_CODE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            knowledge_base: KnowledgeBase::with_defaults(),
            error_codes: default_error_codes(),
            config,
            code_patterns,
        })
    }

    /// Replace the seeded knowledge base.
    pub fn with_knowledge_base(mut self, knowledge_base: KnowledgeBase) -> Self {
        self.knowledge_base = knowledge_base;
        self
    }

    /// Replace the built-in error-code mapping.
    pub fn with_error_codes(mut self, error_codes: HashMap<String, String>) -> Self {
        self.error_codes = error_codes;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Analyze an alert and return the tagged report. Internal failures are
    /// converted into a degraded error report; this method never fails.
    pub fn analyze_alert(&self, alert_text: &str) -> String {
        info!("Starting alert analysis");

        match self.run_pipeline(alert_text) {
            Ok(report) => {
                info!("Alert analysis completed");
                report
            }
            Err(e) => {
                error!("Alert analysis failed: {}", e);
                tagged::render_error(&e.to_string())
            }
        }
    }

    fn run_pipeline(&self, alert_text: &str) -> AnalysisResult<String> {
        let possible_causes = self.identify_causes(alert_text);
        let impact_assessment = impact::assess_impact(alert_text);
        let response_measures =
            response::generate_response(alert_text, &possible_causes, &self.knowledge_base);

        Ok(tagged::render(
            &possible_causes,
            &impact_assessment,
            &response_measures,
        ))
    }

    /// Ordered, never-empty list of candidate causes for an alert.
    pub fn identify_causes(&self, alert_text: &str) -> Vec<String> {
        causes::identify_causes(
            &self.code_patterns,
            &self.error_codes,
            &self.knowledge_base,
            self.config.similarity_threshold,
            self.config.max_historical_matches,
            alert_text,
        )
    }

    /// Structured summary of an analysis, re-running the cause and impact
    /// logic over the alert text.
    pub fn get_summary(&self, alert_text: &str) -> AnalysisResult<AnalysisSummary> {
        let possible_causes = self.identify_causes(alert_text);
        let (severity, _) = impact::detect_severity(alert_text);
        let affected_systems = causes::components_in(alert_text)
            .into_iter()
            .map(|c| c.to_string())
            .collect();

        Ok(AnalysisSummary {
            analysis_id: uuid::Uuid::new_v4().to_string(),
            severity: severity.to_string(),
            affected_systems,
            cause_count: possible_causes.len(),
            has_historical_match: possible_causes
                .iter()
                .any(|cause| cause.contains(HISTORICAL_MARKER)),
            error_codes: causes::extract_error_codes(&self.code_patterns, alert_text),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// Insert or overwrite a historical incident, immediately visible to
    /// subsequent analyses.
    pub fn add_incident(&mut self, id: impl Into<String>, incident: Incident) {
        let id = id.into();
        info!(incident = %id, "adding historical incident");
        self.knowledge_base.insert(id, incident);
    }

    /// Insert or overwrite an error-code mapping.
    pub fn update_error_code(&mut self, code: impl Into<String>, meaning: impl Into<String>) {
        let code = code.into();
        let meaning = meaning.into();
        info!(code = %code, meaning = %meaning, "updating error code mapping");
        self.error_codes.insert(code, meaning);
    }
}
