use super::*;

use std::sync::Mutex;

struct EchoBackend {
    seen: Mutex<Vec<CompletionRequest>>,
}

#[async_trait]
impl ChatBackend for EchoBackend {
    async fn chat(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(format!("echo: {}", request.user))
    }
}

struct FailingBackend(&'static str);

#[async_trait]
impl ChatBackend for FailingBackend {
    async fn chat(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        Err(CompletionError::Request(self.0.to_string()))
    }
}

// ===== wire format =====

#[test]
fn request_body_keeps_provider_schema() {
    let body = ChatRequest {
        model: "llama3-8b-8192",
        messages: [
            WireMessage { role: "system", content: "You are a virtual doctor." },
            WireMessage { role: "user", content: "I have a headache." },
        ],
        temperature: 0.7,
        max_tokens: 1000,
    };

    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["model"], "llama3-8b-8192");
    assert_eq!(value["max_tokens"], 1000);
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["role"], "user");
    assert_eq!(value["messages"][1]["content"], "I have a headache.");
    assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "id": "chatcmpl-1",
        "model": "mixtral-8x7b-32768",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Eat more leafy greens." },
            "finish_reason": "stop"
        }]
    })
    .to_string();

    assert_eq!(parse_chat_response(&json).unwrap(), "Eat more leafy greens.");
}

#[test]
fn parse_missing_choices_is_empty_response() {
    let json = serde_json::json!({ "choices": [] }).to_string();
    assert!(matches!(parse_chat_response(&json), Err(CompletionError::EmptyResponse)));
}

#[test]
fn parse_null_content_is_empty_response() {
    let json = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": null } }]
    })
    .to_string();
    assert!(matches!(parse_chat_response(&json), Err(CompletionError::EmptyResponse)));
}

#[test]
fn parse_garbage_is_parse_error() {
    assert!(matches!(parse_chat_response("<html>502</html>"), Err(CompletionError::Parse(_))));
}

// ===== error rendering =====

#[test]
fn unavailable_renders_fixed_notice() {
    let err = CompletionError::ClientUnavailable("GROQ_API_KEY is not set".into());
    assert_eq!(render_completion_error(&err), UNAVAILABLE_NOTICE);
}

#[test]
fn remote_failures_render_as_apology_with_detail() {
    let err = CompletionError::Status { status: 429, body: "rate limit reached".into() };
    let text = render_completion_error(&err);
    assert!(text.starts_with("I apologize, but I encountered an error:"));
    assert!(text.contains("429"));
    assert!(text.contains("rate limit reached"));
}

// ===== adapter =====

#[tokio::test]
async fn unavailable_adapter_returns_notice_for_any_input() {
    let adapter = CompletionAdapter::unavailable("no key");
    assert!(!adapter.is_available());

    for (system, user, model) in [("", "", ""), ("sys", "hello", "mixtral-8x7b-32768"), ("x", "\n", "?")] {
        let text = adapter.complete(system, user, model, 0.7, 1000).await;
        assert_eq!(text, UNAVAILABLE_NOTICE);
    }

    let err = adapter.try_complete("s", "u", "m", 0.7, 1000).await.unwrap_err();
    assert!(matches!(err, CompletionError::ClientUnavailable(reason) if reason == "no key"));
}

#[tokio::test]
async fn adapter_without_key_is_unavailable() {
    let adapter = CompletionAdapter::from_config(&GroqConfig::default());
    assert!(!adapter.is_available());
    assert_eq!(adapter.complete("s", "u", "m", 0.7, 1000).await, UNAVAILABLE_NOTICE);
}

#[tokio::test]
async fn adapter_forwards_request_fields() {
    let backend = std::sync::Arc::new(EchoBackend { seen: Mutex::new(Vec::new()) });

    struct Shared(std::sync::Arc<EchoBackend>);

    #[async_trait]
    impl ChatBackend for Shared {
        async fn chat(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.0.chat(request).await
        }
    }

    let adapter = CompletionAdapter::with_backend(Box::new(Shared(backend.clone())));
    let settings = ModelSettings::new("llama3-8b-8192");
    let text = adapter.answer("system text", "user text", &settings).await;

    assert_eq!(text, "echo: user text");
    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].system, "system text");
    assert_eq!(seen[0].model, "llama3-8b-8192");
    assert_eq!(seen[0].max_tokens, DEFAULT_MAX_TOKENS);
    assert!((seen[0].temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
}

#[tokio::test]
async fn remote_failure_is_absorbed_into_text() {
    let adapter = CompletionAdapter::with_backend(Box::new(FailingBackend("quota exceeded")));

    let err = adapter.try_complete("s", "u", "m", 0.7, 1000).await.unwrap_err();
    assert!(matches!(err, CompletionError::Request(_)));

    let text = adapter.complete("s", "u", "m", 0.7, 1000).await;
    assert!(text.starts_with("I apologize, but I encountered an error:"));
    assert!(text.contains("quota exceeded"));
}

#[tokio::test]
async fn connection_refused_becomes_request_error() {
    let timeouts = Timeouts { request_secs: 5, connect_secs: 2 };
    let client = GroqClient::new("gsk-test".into(), "http://127.0.0.1:9/v1/", timeouts).unwrap();
    let adapter = CompletionAdapter::with_backend(Box::new(client));

    let err = adapter.try_complete("s", "u", "m", 0.7, 1000).await.unwrap_err();
    assert!(matches!(err, CompletionError::Request(_)));

    let text = adapter.complete("s", "u", "m", 0.7, 1000).await;
    assert!(text.contains("request to Groq failed"));
}
