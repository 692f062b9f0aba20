//! The completion client.

use std::pin::Pin;
use std::time::Duration;

use config::ApiConfig;
use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    Error, Result, decode,
    messages::ChatRequest,
    model::{
        DialogueTurn, FeedbackSummary, RepairKind, Spark, SparkContext, SparksPayload, TopicsPayload, TrainingMetrics,
    },
    prompt, sse,
};

/// Model retried once when the requested model answers with a non-2xx status.
const FALLBACK_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// An ordered, finite stream of reply fragments. Dropping it closes the
/// underlying connection; a half-read stream is a normal termination.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Client for the chat-completions endpoint.
///
/// Construct one at startup and pass it by reference to callers. The client
/// holds no mutable state; concurrent calls share nothing but the
/// configuration and credential.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    model: String,
    key: Option<SecretString>,
}

impl Client {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Server(format!("failed to initialize HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            key: config.key.clone(),
        })
    }

    /// Generate 3–5 typed conversation sparks for a situation and audience.
    pub async fn generate_sparks(&self, context: &SparkContext) -> Result<Vec<Spark>> {
        let request = ChatRequest::json_mode(self.model.clone(), 0.7, prompt::sparks(context)).with_penalties(0.3, 0.3);

        let content = self.complete(request).await?;
        let payload: SparksPayload = decode::json_payload(&content)?;

        log::debug!("Generated {} sparks", payload.items.len());
        Ok(payload.items)
    }

    /// Open a streaming training reply for the given persona and transcript.
    ///
    /// Fragments arrive in the order the remote endpoint emits them. The
    /// caller may stop consuming at any point; no cancel message is sent,
    /// the connection is simply closed.
    pub async fn stream_reply(
        &self,
        persona: &str,
        context: &str,
        transcript: &[DialogueTurn],
        locale: &str,
    ) -> Result<ReplyStream> {
        let request = ChatRequest::streaming(self.model.clone(), 0.6, prompt::reply(persona, context, transcript, locale));

        let response = self.execute(request, true).await?;
        Ok(sse::fragments(response.bytes_stream().boxed()))
    }

    /// Summarize a finished training session into strengths, one suggestion,
    /// and an optional micro-lesson title.
    pub async fn generate_feedback(
        &self,
        transcript: &[DialogueTurn],
        metrics: &TrainingMetrics,
        locale: &str,
    ) -> Result<FeedbackSummary> {
        let request = ChatRequest::json_mode(self.model.clone(), 0.3, prompt::feedback(transcript, metrics, locale));

        let content = self.complete(request).await?;
        decode::json_payload(&content)
    }

    /// One coach line the user could say next, avoiding earlier suggestions.
    pub async fn repair_suggestion(
        &self,
        kind: RepairKind,
        persona: &str,
        context: &str,
        transcript: &[DialogueTurn],
        avoid: &[String],
    ) -> Result<String> {
        let request = ChatRequest::new(
            self.model.clone(),
            0.6,
            prompt::repair(kind, persona, context, transcript, avoid),
        );

        let content = self.complete(request).await?;

        // One line only; models occasionally pad with a blank line.
        Ok(content.lines().find(|line| !line.trim().is_empty()).unwrap_or("").trim().to_string())
    }

    /// One practical conversation tip for today.
    pub async fn daily_advice(&self, locale: &str) -> Result<String> {
        let request = ChatRequest::new(self.model.clone(), 0.9, prompt::daily_advice(locale));

        let content = self.complete(request).await?;
        Ok(content.trim().to_string())
    }

    /// Up to `count` light conversation topics as short labels.
    pub async fn daily_topics(&self, count: usize, locale: &str) -> Result<Vec<String>> {
        let request =
            ChatRequest::json_mode(self.model.clone(), 0.9, prompt::daily_topics(count, locale)).with_penalties(0.3, 0.3);

        let content = self.complete(request).await?;
        let payload: TopicsPayload = decode::json_payload(&content)?;

        let mut topics = payload.topics;
        topics.truncate(count);
        Ok(topics)
    }

    /// Run a non-streaming call and return the first choice's content.
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let response = self.execute(request, false).await?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Server(format!("failed to read response body: {e}")))?;

        decode::message_content(&body)
    }

    /// Send the request, trying the requested model and then the fallback.
    ///
    /// Exactly one fallback attempt per logical call: the candidate list is
    /// the requested model followed by [`FALLBACK_MODEL`], deduplicated. A
    /// non-2xx status moves on to the next candidate; transport errors
    /// propagate immediately without consuming the fallback.
    async fn execute(&self, mut request: ChatRequest, streaming: bool) -> Result<reqwest::Response> {
        let bearer = self.bearer()?;
        let url = format!("{}/chat/completions", self.base_url);

        let mut candidates = vec![request.model.clone()];

        if request.model != FALLBACK_MODEL {
            candidates.push(FALLBACK_MODEL.to_string());
        }

        let attempts = candidates.len();
        let mut last_error = Error::Server("no completion attempt was made".to_string());

        for (attempt, model) in candidates.into_iter().enumerate() {
            request.model = model;

            let mut builder = self.http.post(&url).header(AUTHORIZATION, bearer.as_str()).json(&request);

            if streaming {
                builder = builder.header(ACCEPT, "text/event-stream");
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Error::Server(format!("failed to send request: {e}")))?;

            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            let message = response.text().await.unwrap_or_else(|_| "unknown error".to_string());

            if attempt + 1 < attempts {
                log::warn!("Model {} answered HTTP {status}, retrying with {FALLBACK_MODEL}", request.model);
            } else {
                log::error!("Completion request failed with HTTP {status}: {message}");
            }

            last_error = Error::Server(format!("HTTP {status}: {message}"));
        }

        Err(last_error)
    }

    /// Authorization header value. Fails fast before any network I/O when no
    /// key is configured.
    fn bearer(&self) -> Result<String> {
        let key = self.key.as_ref().ok_or(Error::MissingApiKey)?;

        Ok(format!("Bearer {}", key.expose_secret()))
    }
}
