pub mod config;
pub mod prompts;
pub mod service;
pub mod workflow;

pub use config::LlmConfig;
pub use service::{ChatMessage, CompletionService, LlmService, LlmServiceError};
