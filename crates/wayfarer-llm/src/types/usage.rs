use serde::{Deserialize, Serialize};

/// Provider-reported token usage for a single call.
///
/// `total` comes from the provider as-is; it is not recomputed locally.
/// The client keeps only the most recent call's usage, overwritten on
/// every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u32,
    pub output: u32,
    pub total: u32,
}
