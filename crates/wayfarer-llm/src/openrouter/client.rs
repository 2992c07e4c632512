// OpenRouter chat-completions client (HTTP direct, no SDK)

use std::future::Future;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::InferenceError;
use crate::limiter::RateLimiter;
use crate::retry::RetryPolicy;
use crate::structured::ResponseSchema;
use crate::traits::{ChatModel, Reply};
use crate::types::{Message, TokenUsage};

use super::responses::{ChatCompletion, WireMessage};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Inference client for OpenRouter and OpenAI-compatible endpoints.
///
/// Every invocation funnels through the same path: a rate-limit slot is
/// acquired per attempt, the retry policy re-runs transient transport
/// failures, and the decoded reply overwrites the stored token usage.
/// Provider application errors come back as typed
/// [`InferenceError::Api`] values; nothing here aborts the process.
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: ClientConfig,
    endpoint: String,
    limiter: RateLimiter,
    retry: RetryPolicy,
    usage: Mutex<Option<TokenUsage>>,
}

impl OpenRouterClient {
    /// Create a client with its own private rate-limit window.
    pub fn new(config: ClientConfig) -> Result<Self, InferenceError> {
        let limiter = RateLimiter::new(config.rate_limit_calls, config.rate_limit_period);
        Self::with_limiter(config, limiter)
    }

    /// Create a client gated by an existing limiter.
    ///
    /// Clone one [`RateLimiter`] into several clients to share a single
    /// call ceiling across them; `new` scopes the window per instance.
    pub fn with_limiter(config: ClientConfig, limiter: RateLimiter) -> Result<Self, InferenceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| InferenceError::Config("invalid API key format".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| InferenceError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config
                .base_url
                .clone()
                .unwrap_or_else(|| OPENROUTER_API_URL.to_string()),
            retry: RetryPolicy::new(config.max_attempts),
            usage: Mutex::new(None),
            limiter,
            config,
        })
    }

    /// Usage reported by the most recent call, if any.
    pub fn last_usage(&self) -> Option<TokenUsage> {
        *self.usage.lock()
    }

    /// Free-text completion.
    pub async fn invoke(&self, messages: &[Message]) -> Result<Reply, InferenceError> {
        let completion = self.request(messages, false, None).await?;
        self.resolve(completion, false)
    }

    /// JSON-mode completion: content is parsed as generic JSON.
    pub async fn invoke_json(&self, messages: &[Message]) -> Result<Reply, InferenceError> {
        let completion = self.request(messages, true, None).await?;
        self.resolve(completion, true)
    }

    /// Structured completion: content is validated against `schema` and
    /// deserialized into `T`. Validation failure is terminal.
    pub async fn invoke_structured<T: DeserializeOwned>(
        &self,
        messages: &[Message],
        schema: &ResponseSchema,
    ) -> Result<T, InferenceError> {
        let completion = self.request(messages, true, Some(schema)).await?;
        let message = first_message(completion)?;
        let content = message
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| InferenceError::Decode("structured response had no content".into()))?;
        schema.validate_as(&content)
    }

    /// Blocking form of [`invoke`](Self::invoke).
    ///
    /// Spins a private current-thread runtime; must not be called from
    /// inside an async context.
    pub fn invoke_blocking(&self, messages: &[Message]) -> Result<Reply, InferenceError> {
        block_on(self.invoke(messages))
    }

    /// Blocking form of [`invoke_json`](Self::invoke_json).
    pub fn invoke_json_blocking(&self, messages: &[Message]) -> Result<Reply, InferenceError> {
        block_on(self.invoke_json(messages))
    }

    /// Blocking form of [`invoke_structured`](Self::invoke_structured).
    pub fn invoke_structured_blocking<T: DeserializeOwned>(
        &self,
        messages: &[Message],
        schema: &ResponseSchema,
    ) -> Result<T, InferenceError> {
        block_on(self.invoke_structured(messages, schema))
    }

    /// Rate-limited, retried request cycle shared by every entry point.
    async fn request(
        &self,
        messages: &[Message],
        json_mode: bool,
        schema: Option<&ResponseSchema>,
    ) -> Result<ChatCompletion, InferenceError> {
        if messages.is_empty() {
            return Err(InferenceError::EmptyConversation);
        }
        let payload = self.build_payload(messages, json_mode, schema);
        let completion = self.retry.run(|| self.attempt(&payload)).await?;
        if let Some(usage) = &completion.usage {
            *self.usage.lock() = Some(TokenUsage {
                input: usage.prompt_tokens,
                output: usage.completion_tokens,
                total: usage.total_tokens,
            });
        }
        Ok(completion)
    }

    /// One network attempt: acquire a slot, POST, decode, classify.
    async fn attempt(&self, payload: &Value) -> Result<ChatCompletion, InferenceError> {
        self.limiter.acquire().await;
        debug!(endpoint = %self.endpoint, model = %self.config.model, "sending chat completion request");

        let response = self.http.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let completion: ChatCompletion = match serde_json::from_str(&body) {
            Ok(completion) => completion,
            // A gateway 5xx often carries a non-JSON body; that is a
            // transport problem, not a provider verdict.
            Err(_) if status.is_server_error() => {
                return Err(InferenceError::Transport(format!(
                    "server error {status}: {}",
                    snippet(&body)
                )));
            }
            Err(e) => {
                return Err(InferenceError::Decode(format!(
                    "malformed response body: {e}"
                )));
            }
        };

        if let Some(error) = completion.error {
            warn!(status = %status, message = %error.message, "provider returned an error");
            return Err(InferenceError::Api {
                status: Some(status.as_u16()),
                message: error.message,
            });
        }
        if !status.is_success() {
            return Err(InferenceError::Api {
                status: Some(status.as_u16()),
                message: snippet(&body),
            });
        }
        Ok(completion)
    }

    fn build_payload(
        &self,
        messages: &[Message],
        json_mode: bool,
        schema: Option<&ResponseSchema>,
    ) -> Value {
        let contents: Vec<Value> = messages
            .iter()
            .map(|message| match (message, schema) {
                // The provider sees schema instructions in place of the raw
                // system text; the caller's message is left untouched.
                (Message::System { content }, Some(schema)) => Message::system(format!(
                    "{content}\n\n{}",
                    schema.format_instructions()
                ))
                .to_payload(),
                _ => message.to_payload(),
            })
            .collect();

        let response_format = if json_mode || schema.is_some() {
            "json_object"
        } else {
            "text"
        };

        let mut payload = json!({
            "model": self.config.model,
            "messages": contents,
            "temperature": self.config.temperature,
            "response_format": { "type": response_format },
            "stream": false,
        });
        if !self.config.tools.is_empty() {
            if let Some(object) = payload.as_object_mut() {
                object.insert(
                    "tools".to_string(),
                    Value::Array(self.config.tools.iter().map(|t| t.to_payload()).collect()),
                );
            }
        }
        payload
    }

    /// Decode the first choice, preferring text over tool calls.
    fn resolve(&self, completion: ChatCompletion, json_mode: bool) -> Result<Reply, InferenceError> {
        let message = first_message(completion)?;
        let content = message.content.filter(|c| !c.is_empty());

        if json_mode {
            let content = content.ok_or_else(|| {
                InferenceError::Decode("json mode response had no content".into())
            })?;
            let value = serde_json::from_str(&content)
                .map_err(|e| InferenceError::Decode(format!("content is not valid JSON: {e}")))?;
            return Ok(Reply::Json(value));
        }

        if let Some(content) = content {
            return Ok(Reply::Text(content));
        }

        let call = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                InferenceError::Decode("response had neither content nor tool calls".into())
            })?;
        let arguments = call.function.arguments_value()?;
        Ok(Reply::ToolCall {
            id: Uuid::new_v4().to_string(),
            name: call.function.name,
            arguments,
        })
    }
}

#[async_trait]
impl ChatModel for OpenRouterClient {
    async fn invoke(&self, messages: &[Message]) -> Result<Reply, InferenceError> {
        OpenRouterClient::invoke(self, messages).await
    }

    async fn invoke_json(&self, messages: &[Message]) -> Result<Reply, InferenceError> {
        OpenRouterClient::invoke_json(self, messages).await
    }

    fn last_usage(&self) -> Option<TokenUsage> {
        OpenRouterClient::last_usage(self)
    }
}

fn first_message(completion: ChatCompletion) -> Result<WireMessage, InferenceError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| InferenceError::Decode("response contained no choices".into()))
}

fn block_on<T>(
    future: impl Future<Output = Result<T, InferenceError>>,
) -> Result<T, InferenceError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| InferenceError::Config(format!("failed to start blocking runtime: {e}")))?;
    runtime.block_on(future)
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > 200 {
        let head: String = trimmed.chars().take(200).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}
