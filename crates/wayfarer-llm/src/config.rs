// Configuration surface for inference clients

use std::time::Duration;

use crate::types::Tool;

/// Everything an inference client needs to talk to a provider.
///
/// Built fluently:
///
/// ```rust
/// use std::time::Duration;
/// use wayfarer_llm::ClientConfig;
///
/// let config = ClientConfig::new("qwen/qwen-2.5-72b-instruct", "sk-or-...")
///     .temperature(0.0)
///     .max_attempts(3)
///     .rate_limit(15, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub model: String,
    pub api_key: String,

    /// Overrides the provider's default endpoint when set.
    pub base_url: Option<String>,
    pub temperature: f32,

    /// Tools advertised to the model on every request.
    pub tools: Vec<Tool>,

    /// Attempt budget for transient transport failures.
    pub max_attempts: u32,

    /// Calls permitted per rolling window.
    pub rate_limit_calls: usize,

    /// Rolling window duration.
    pub rate_limit_period: Duration,

    /// Advisory request timeout. `None` means the client waits on the
    /// provider indefinitely; callers wanting cancellation wrap the
    /// invocation in their own timeout scope.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
            temperature: 0.0,
            tools: Vec::new(),
            max_attempts: 3,
            rate_limit_calls: 15,
            rate_limit_period: Duration::from_secs(60),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn rate_limit(mut self, calls: usize, period: Duration) -> Self {
        self.rate_limit_calls = calls;
        self.rate_limit_period = period;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("test-model", "test-key");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.rate_limit_calls, 15);
        assert_eq!(config.rate_limit_period, Duration::from_secs(60));
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert!(config.tools.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let config = ClientConfig::new("test-model", "test-key")
            .with_base_url("http://localhost:8080/v1/chat/completions")
            .temperature(0.7)
            .rate_limit(2, Duration::from_millis(500))
            .max_attempts(5)
            .tool(Tool::new("search", "Search the web", json!({"type": "object"})));

        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.rate_limit_calls, 2);
        assert_eq!(config.tools.len(), 1);
        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:8080/v1/chat/completions")
        );
    }
}
