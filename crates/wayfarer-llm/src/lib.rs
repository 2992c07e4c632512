//! Inference client for remote LLM chat-completion endpoints.
//!
//! The crate turns an ordered sequence of [`Message`]s into one of three
//! typed results — free text, generic JSON, or a schema-validated value —
//! while enforcing a sliding-window call ceiling and bounded retries on
//! transient transport failures. Token usage from each call is kept on the
//! client for cost accounting.
//!
//! ```rust,no_run
//! use wayfarer_llm::{ClientConfig, Message, OpenRouterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wayfarer_llm::InferenceError> {
//!     let client = OpenRouterClient::new(ClientConfig::new(
//!         "qwen/qwen-2.5-72b-instruct",
//!         std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
//!     ))?;
//!
//!     let reply = client
//!         .invoke(&[
//!             Message::system("You are a helpful web navigation assistant."),
//!             Message::human("Summarize the page title."),
//!         ])
//!         .await?;
//!     println!("{:?}", reply.as_text());
//!     println!("usage: {:?}", client.last_usage());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod limiter;
pub mod openrouter;
pub mod retry;
pub mod structured;
pub mod traits;
pub mod types;

pub use config::ClientConfig;
pub use error::InferenceError;
pub use limiter::RateLimiter;
pub use openrouter::OpenRouterClient;
pub use retry::RetryPolicy;
pub use structured::ResponseSchema;
pub use traits::{ChatModel, Reply};
pub use types::{Message, TokenUsage, Tool};
