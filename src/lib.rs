pub mod analysis;
pub mod cli;
pub mod knowledge;
pub mod lexicon;
pub mod llm;
pub mod report;

pub use analysis::{AlertAnalyzer, AnalysisSummary, AnalyzerConfig};
pub use knowledge::{Incident, KnowledgeBase};
