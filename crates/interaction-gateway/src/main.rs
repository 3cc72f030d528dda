//! # Interaction Gateway
//!
//! Process entry point for the Discord interactions webhook.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`INTERACTIONS_LOG_LEVEL`, `INTERACTIONS_JSON_LOGS`)
//! 2. Load configuration from the environment; a missing
//!    `DISCORD_PUBLIC_KEY` stops the process here
//! 3. Pick the reply generator (completion service if `COMPLETION_API_KEY`
//!    is set, echo otherwise)
//! 4. Serve until Ctrl-C

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use interaction_gateway::{
    ChatCompletionClient, EchoReplyGenerator, GatewayConfig, InteractionGatewayService,
    ReplyGenerator, VERSION,
};
use interaction_telemetry::{init_telemetry, TelemetryConfig};

fn reply_generator(config: &GatewayConfig) -> Result<Arc<dyn ReplyGenerator>> {
    match &config.completion {
        Some(completion) => {
            info!(
                model = %completion.model,
                endpoint = %completion.endpoint,
                timeout_ms = completion.timeout.as_millis() as u64,
                "Completion service enabled"
            );
            let client = ChatCompletionClient::new(completion.clone())
                .context("failed to build completion client")?;
            Ok(Arc::new(client))
        }
        None => {
            info!("No completion service configured, replies echo the query");
            Ok(Arc::new(EchoReplyGenerator::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(&TelemetryConfig::from_env()).context("failed to initialize logging")?;

    info!(version = VERSION, "Starting interaction gateway");

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e).context("failed to load configuration");
        }
    };

    let generator = reply_generator(&config)?;
    let service = InteractionGatewayService::new(config, generator)?;

    service.start().await?;

    Ok(())
}
