// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! Interaction Gateway - Discord interactions webhook.
//!
//! Authenticates every inbound interaction with the application's Ed25519
//! public key and answers Pings and application commands.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                       INTERACTION GATEWAY                             │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │   POST /discord-bot          GET /health          GET /metrics        │
//! │          │                                                            │
//! │  ┌───────┴────────────────────────────────┐                          │
//! │  │  Middleware: Tracing                    │                          │
//! │  └───────┬────────────────────────────────┘                          │
//! │          │                                                            │
//! │  ┌───────┴──────┐   ┌───────────────┐   ┌──────────────────────┐     │
//! │  │ Request Shape │ → │   Signature   │ → │ Interaction          │     │
//! │  │  (400)        │   │   Verifier    │   │ Dispatcher (200/400) │     │
//! │  └──────────────┘   │   (401)       │   └──────────┬───────────┘     │
//! │                     └───────────────┘              │                  │
//! │                                         ┌──────────┴───────────┐     │
//! │                                         │   ReplyGenerator     │     │
//! │                                         │  (echo | completion) │     │
//! │                                         └──────────────────────┘     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use interaction_gateway::{EchoReplyGenerator, GatewayConfig, InteractionGatewayService};
//!
//! let config = GatewayConfig::from_env()?;
//! let service = InteractionGatewayService::new(config, Arc::new(EchoReplyGenerator::new()))?;
//! service.start().await?;
//! ```
//!
//! # Security
//!
//! - Nothing in the body is parsed before its signature verifies
//! - Every verification failure gets the same 401 `{"error": "Invalid request"}`
//! - Request bodies are capped (JSON 413 beyond the limit), and are read only
//!   after method and headers pass

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod service;

// Re-exports for public API
pub use adapters::{ChatCompletionClient, EchoReplyGenerator};
pub use domain::config::{CompletionConfig, GatewayConfig};
pub use domain::dispatcher::InteractionDispatcher;
pub use domain::error::{GatewayError, InteractionError};
pub use domain::interaction::{InteractionResponse, InteractionType};
pub use domain::verifier::{SignatureVerifier, Verification};
pub use middleware::InteractionMetrics;
pub use ports::{CompletionError, ReplyGenerator};
pub use service::{InteractionGatewayService, ShutdownHandle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
