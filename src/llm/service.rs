use crate::llm::config::LlmConfig;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur in the LLM service
#[derive(Debug, Error)]
pub enum LlmServiceError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Other error: {0}")]
    Other(String),
}

impl LlmServiceError {
    /// Transient failures worth retrying with backoff.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::RateLimitExceeded | Self::ApiError(_)
        )
    }
}

/// Chat message for LLM interactions
#[derive(Debug, Clone)]
pub enum ChatMessage {
    User(String),
    Assistant(String),
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self::User(content.to_string())
    }

    pub fn assistant(content: &str) -> Self {
        Self::Assistant(content.to_string())
    }

    fn into_openai_message(self) -> Result<ChatCompletionRequestMessage, String> {
        match self {
            ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::User)
                .map_err(|e| e.to_string()),
            ChatMessage::Assistant(content) => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::Assistant)
                .map_err(|e| e.to_string()),
        }
    }
}

/// The single seam between the rule-based analyzer and any generative
/// classifier: one completion operation over a system instruction and a
/// role-tagged message history.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, LlmServiceError>;
}

/// OpenAI-backed completion service with per-request timeout and
/// exponential-backoff retry for transient errors.
pub struct LlmService {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: LlmConfig) -> Result<Self, LlmServiceError> {
        config.validate().map_err(LlmServiceError::ConfigError)?;

        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);

        if let Some(api_base) = &config.api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        let client = Client::with_config(openai_config);

        Ok(Self { client, config })
    }

    /// Create a service from environment variables
    pub fn from_env() -> Result<Self, LlmServiceError> {
        let config = LlmConfig::from_env().map_err(LlmServiceError::ConfigError)?;
        Self::new(config)
    }

    async fn chat_once(
        &self,
        system_prompt: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, LlmServiceError> {
        let mut openai_messages = vec![ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map(ChatCompletionRequestMessage::System)
            .map_err(|e| LlmServiceError::Other(e.to_string()))?];

        openai_messages.extend(
            messages
                .into_iter()
                .map(|msg| msg.into_openai_message())
                .collect::<Result<Vec<_>, _>>()
                .map_err(LlmServiceError::Other)?,
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(openai_messages)
            .max_completion_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build()
            .map_err(|e| LlmServiceError::ApiError(e.to_string()))?;

        if self.config.debug {
            tracing::debug!(
                model = %self.config.model,
                messages = request.messages.len(),
                "sending completion request"
            );
        }

        let response = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| LlmServiceError::Timeout)?
        .map_err(|e| {
            if e.to_string().contains("rate limit") {
                LlmServiceError::RateLimitExceeded
            } else {
                LlmServiceError::ApiError(e.to_string())
            }
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| LlmServiceError::ParseError("No response content".to_string()))?
            .to_string();

        if self.config.debug {
            tracing::debug!("received response: {} chars", content.len());
        }

        Ok(content)
    }
}

#[async_trait]
impl CompletionService for LlmService {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, LlmServiceError> {
        let mut last_error = LlmServiceError::Other("no attempts made".to_string());

        for attempt in 0..self.config.max_retries {
            match self.chat_once(system_prompt, messages.clone()).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() && attempt + 1 < self.config.max_retries => {
                    let wait = Duration::from_secs(1 << attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max = self.config.max_retries,
                        wait_secs = wait.as_secs(),
                        "completion request failed, retrying: {}",
                        e
                    );
                    tokio::time::sleep(wait).await;
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}
