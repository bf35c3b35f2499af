//! Workflow combinators over a completion service: sequential chaining,
//! bounded parallel fan-out, and classification-based routing.

use super::prompts::extract_xml;
use super::service::{ChatMessage, CompletionService, LlmServiceError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Chain multiple prompts sequentially, feeding each result into the next
/// step's input.
pub async fn chain(
    service: &dyn CompletionService,
    system_prompt: &str,
    input: &str,
    prompts: &[String],
) -> Result<String, LlmServiceError> {
    let mut result = input.to_string();

    for (step, prompt) in prompts.iter().enumerate() {
        debug!(step = step + 1, total = prompts.len(), "running chain step");
        result = service
            .complete(
                system_prompt,
                vec![ChatMessage::user(&format!("{}\nInput: {}", prompt, result))],
            )
            .await?;
    }

    Ok(result)
}

/// Process multiple inputs concurrently with the same prompt, at most
/// `n_workers` requests in flight. Results are returned in input order;
/// the first failing call fails the whole batch.
pub async fn parallel(
    service: Arc<dyn CompletionService>,
    system_prompt: &str,
    prompt: &str,
    inputs: Vec<String>,
    n_workers: usize,
) -> Result<Vec<String>, LlmServiceError> {
    let semaphore = Arc::new(Semaphore::new(n_workers.max(1)));
    let mut handles = Vec::with_capacity(inputs.len());

    for input in inputs {
        let service = Arc::clone(&service);
        let semaphore = Arc::clone(&semaphore);
        let system_prompt = system_prompt.to_string();
        let message = format!("{}\nInput: {}", prompt, input);

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| LlmServiceError::Other(e.to_string()))?;
            service
                .complete(&system_prompt, vec![ChatMessage::user(&message)])
                .await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| LlmServiceError::Other(format!("worker task failed: {}", e)))??;
        results.push(result);
    }

    Ok(results)
}

/// Route input to a specialized prompt using LLM content classification.
/// The selector response must carry a `<selection>` tag naming one of the
/// route keys.
pub async fn route(
    service: &dyn CompletionService,
    system_prompt: &str,
    input: &str,
    routes: &HashMap<String, String>,
) -> Result<String, LlmServiceError> {
    let mut keys: Vec<&String> = routes.keys().collect();
    keys.sort();

    let selector_prompt = format!(
        "Analyze the input and select the most appropriate route from these options: {:?}\n\
         First explain your reasoning, then provide your selection in this XML format:\n\n\
         <reasoning>\n\
         Brief explanation of why this input matches the selected route.\n\
         </reasoning>\n\n\
         <selection>\n\
         The chosen route name\n\
         </selection>\n\n\
         Input: {}",
        keys, input
    );

    let response = service
        .complete(system_prompt, vec![ChatMessage::user(&selector_prompt)])
        .await?;

    let route_key = extract_xml(&response, "selection")
        .ok_or_else(|| LlmServiceError::ParseError("selector response has no <selection> tag".to_string()))?
        .to_lowercase();

    let selected_prompt = routes.get(route_key.as_str()).ok_or_else(|| {
        LlmServiceError::ParseError(format!("selector chose unknown route '{}'", route_key))
    })?;

    info!(route = %route_key, "routing input to specialized prompt");

    service
        .complete(
            system_prompt,
            vec![ChatMessage::user(&format!("{}\nInput: {}", selected_prompt, input))],
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted completion service: replies based on simple content checks.
    struct FakeService {
        calls: AtomicUsize,
        fail_on_input: Option<String>,
    }

    impl FakeService {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on_input: None,
            }
        }

        fn failing_on(input: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on_input: Some(input.to_string()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for FakeService {
        async fn complete(
            &self,
            _system_prompt: &str,
            messages: Vec<ChatMessage>,
        ) -> Result<String, LlmServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let ChatMessage::User(content) = &messages[0] else {
                return Err(LlmServiceError::Other("unexpected role".to_string()));
            };

            if let Some(bad) = &self.fail_on_input {
                if content.contains(bad) {
                    return Err(LlmServiceError::ApiError("server error".to_string()));
                }
            }

            if content.contains("select the most appropriate route") {
                return Ok("<reasoning>db keywords</reasoning>\n<selection>database</selection>".to_string());
            }

            Ok(format!("echo:{}", content.lines().last().unwrap_or_default()))
        }
    }

    #[tokio::test]
    async fn chain_feeds_results_forward() {
        let service = FakeService::new();
        let prompts = vec!["step one".to_string(), "step two".to_string()];

        let result = chain(&service, "sys", "start", &prompts).await.unwrap();
        // Step two receives step one's output as its input line.
        assert_eq!(result, "echo:Input: echo:Input: start");
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn parallel_preserves_input_order() {
        let service: Arc<dyn CompletionService> = Arc::new(FakeService::new());
        let inputs: Vec<String> = (0..8).map(|i| format!("alert-{}", i)).collect();

        let results = parallel(service, "sys", "analyze", inputs.clone(), 3)
            .await
            .unwrap();

        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result, &format!("echo:Input: alert-{}", i));
        }
    }

    #[tokio::test]
    async fn parallel_propagates_first_failure() {
        let service: Arc<dyn CompletionService> = Arc::new(FakeService::failing_on("alert-2"));
        let inputs: Vec<String> = (0..4).map(|i| format!("alert-{}", i)).collect();

        let result = parallel(service, "sys", "analyze", inputs, 2).await;
        assert!(matches!(result, Err(LlmServiceError::ApiError(_))));
    }

    #[tokio::test]
    async fn route_selects_specialized_prompt() {
        let service = FakeService::new();
        let mut routes = HashMap::new();
        routes.insert("database".to_string(), "db triage prompt".to_string());
        routes.insert("network".to_string(), "net triage prompt".to_string());

        let result = route(&service, "sys", "mysql pool exhausted", &routes)
            .await
            .unwrap();
        assert_eq!(result, "echo:Input: mysql pool exhausted");
        // Two calls: one to classify, one for the routed prompt.
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn route_rejects_unknown_selection() {
        let service = FakeService::new();
        let mut routes = HashMap::new();
        routes.insert("network".to_string(), "net".to_string());

        // Selector always answers "database", which is not a route here.
        let result = route(&service, "sys", "anything", &routes).await;
        assert!(matches!(result, Err(LlmServiceError::ParseError(_))));
    }
}
