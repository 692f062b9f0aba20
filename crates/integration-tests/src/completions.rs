use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use futures::StreamExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Builder for a mock chat-completions endpoint.
///
/// The server mimics the OpenAI wire format closely enough for the client:
/// JSON completion bodies, SSE streams terminated by `[DONE]`, and
/// configurable failures for the first N requests to exercise the
/// fallback-model retry.
pub struct CompletionsMock {
    reply: MockReply,
    fail_attempts: usize,
    fail_status: StatusCode,
}

/// What the mock returns once it stops failing.
#[derive(Clone)]
pub enum MockReply {
    /// Plain assistant text wrapped in a standard completion response.
    Text(String),
    /// A JSON value serialized into the assistant message content.
    Json(Value),
    /// Raw SSE event payloads, one `data:` line each. The `[DONE]` sentinel
    /// is appended automatically.
    Sse(Vec<String>),
}

impl CompletionsMock {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            fail_attempts: 0,
            fail_status: StatusCode::TOO_MANY_REQUESTS,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(MockReply::Text(content.into()))
    }

    pub fn json(value: Value) -> Self {
        Self::new(MockReply::Json(value))
    }

    /// A streaming reply delivering the given fragments as delta chunks.
    pub fn streamed_text(parts: &[&str]) -> Self {
        let payloads = parts
            .iter()
            .map(|part| json!({"choices": [{"delta": {"content": part}}]}).to_string())
            .collect();

        Self::new(MockReply::Sse(payloads))
    }

    /// Respond with `status` to the first `attempts` requests.
    pub fn fail_first(mut self, attempts: usize, status: StatusCode) -> Self {
        self.fail_attempts = attempts;
        self.fail_status = status;
        self
    }

    pub async fn spawn(self) -> MockServer {
        let state = Arc::new(MockState {
            reply: self.reply,
            fail_attempts: self.fail_attempts,
            fail_status: self.fail_status,
            hits: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockServer { address, state }
    }
}

/// A running mock endpoint plus its observation hooks.
pub struct MockServer {
    pub address: SocketAddr,
    state: Arc<MockState>,
}

impl MockServer {
    /// Client configuration pointing at this server, with a test key and the
    /// default primary model.
    pub fn api_config(&self) -> config::ApiConfig {
        config::ApiConfig {
            base_url: format!("http://{}/v1", self.address),
            key: Some(SecretString::from("sk-test")),
            model: "4o-nano".to_string(),
        }
    }

    /// Same configuration without a key, for fail-fast tests.
    pub fn api_config_without_key(&self) -> config::ApiConfig {
        config::ApiConfig {
            key: None,
            ..self.api_config()
        }
    }

    /// How many completion requests reached the server.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Model ids of every request, in arrival order.
    pub fn models_seen(&self) -> Vec<String> {
        self.state.models.lock().unwrap().clone()
    }
}

struct MockState {
    reply: MockReply,
    fail_attempts: usize,
    fail_status: StatusCode,
    hits: AtomicUsize,
    models: Mutex<Vec<String>>,
}

async fn chat_completions(State(state): State<Arc<MockState>>, Json(request): Json<Value>) -> Response {
    let attempt = state.hits.fetch_add(1, Ordering::SeqCst);

    let model = request["model"].as_str().unwrap_or_default().to_string();
    state.models.lock().unwrap().push(model.clone());

    if attempt < state.fail_attempts {
        return (
            state.fail_status,
            Json(json!({"error": {"message": "simulated failure"}})),
        )
            .into_response();
    }

    match &state.reply {
        MockReply::Text(content) => completion_response(&model, content).into_response(),
        MockReply::Json(value) => completion_response(&model, &value.to_string()).into_response(),
        MockReply::Sse(payloads) => sse_response(payloads.clone()),
    }
}

fn completion_response(model: &str, content: &str) -> Json<Value> {
    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 0,
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    }))
}

fn sse_response(payloads: Vec<String>) -> Response {
    let mut events: Vec<String> = payloads.into_iter().map(|payload| format!("data: {payload}\n\n")).collect();

    events.push("data: [DONE]\n\n".to_string());

    // One chunk per event with a small gap, so consumers see real
    // incremental delivery instead of one buffered body.
    let stream = futures::stream::iter(events).then(|event| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok::<_, std::convert::Infallible>(event)
    });

    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(Body::from_stream(stream))
        .unwrap()
}
