//! Reply generator that returns the query unchanged.

use crate::ports::outbound::{CompletionError, ReplyGenerator};
use async_trait::async_trait;

/// Echoes the query back. Used when no completion service is configured and
/// as the fallback when one fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoReplyGenerator;

impl EchoReplyGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReplyGenerator for EchoReplyGenerator {
    async fn generate_reply(&self, query: &str) -> Result<String, CompletionError> {
        Ok(query.to_string())
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}
