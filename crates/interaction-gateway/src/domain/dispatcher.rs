//! # Interaction Dispatcher
//!
//! Runs only on bodies whose signature has already been verified. Parsing
//! happens in two stages: the envelope first, then `data` only for an
//! ApplicationCommand. A Ping with odd `data` still gets its Pong.
//!
//! | `type` | Response                                   |
//! |--------|--------------------------------------------|
//! | 1      | `{type: 1}`                                |
//! | 2      | `{type: 4, data: {content: <reply>}}`      |
//! | other  | 400 `{error: "bad request"}`               |

use crate::domain::error::InteractionError;
use crate::domain::interaction::{Interaction, InteractionResponse, InteractionType};
use crate::middleware::metrics::InteractionMetrics;
use crate::ports::outbound::ReplyGenerator;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Option every registered command carries the user's query in.
pub const QUERY_OPTION: &str = "name";

/// Routes verified interactions to a response.
#[derive(Clone)]
pub struct InteractionDispatcher {
    generator: Arc<dyn ReplyGenerator>,
    metrics: Option<Arc<InteractionMetrics>>,
}

impl InteractionDispatcher {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            generator,
            metrics: None,
        }
    }

    /// Count completion fallbacks in `metrics`
    pub fn with_metrics(mut self, metrics: Arc<InteractionMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Dispatch a verified body.
    pub async fn dispatch(&self, body: &[u8]) -> Result<InteractionResponse, InteractionError> {
        let interaction = Interaction::from_slice(body)?;

        match interaction.kind {
            InteractionType::Ping => {
                debug!("Ping received");
                Ok(InteractionResponse::Pong)
            }
            InteractionType::ApplicationCommand => {
                let query = interaction.command_data()?.option_text(QUERY_OPTION)?;
                info!(query = %query, "Application command received");

                let reply = self.reply_for(&query).await;
                info!(reply = %reply, "Replying to application command");

                Ok(InteractionResponse::channel_message(reply))
            }
            InteractionType::Unknown(code) => {
                debug!(code, "Unhandled interaction type");
                Err(InteractionError::UnknownInteractionType(code))
            }
        }
    }

    /// Generated reply, or the query itself if generation fails.
    async fn reply_for(&self, query: &str) -> String {
        match self.generator.generate_reply(query).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "Reply generation failed, echoing query"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_completion_fallback();
                }
                query.to_string()
            }
        }
    }
}
