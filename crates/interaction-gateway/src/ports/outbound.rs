//! Outbound ports for the interaction gateway.

use async_trait::async_trait;
use thiserror::Error;

/// Failures from a reply generator.
///
/// None of these reach the client: the dispatcher falls back to echoing the
/// query when generation fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion timed out")]
    Timeout,

    #[error("completion service returned status {0}")]
    Status(u16),

    #[error("completion service returned no reply")]
    EmptyReply,

    #[error("could not decode completion response: {0}")]
    Decode(String),
}

/// Produces the reply text for an application command query.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(&self, query: &str) -> Result<String, CompletionError>;

    /// Short label used in logs
    fn name(&self) -> &'static str {
        "unnamed"
    }
}
