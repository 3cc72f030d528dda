//! Domain types for the interaction gateway.
//!
//! Request pipeline, in order: [`request_shape`] → [`verifier`] → [`dispatcher`].

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod interaction;
pub mod request_shape;
pub mod verifier;

// Re-exports for convenience
pub use config::{CompletionConfig, ConfigError, GatewayConfig, LimitsConfig};
pub use dispatcher::{InteractionDispatcher, QUERY_OPTION};
pub use error::{GatewayError, InteractionError};
pub use interaction::{Interaction, InteractionResponse, InteractionType, MAX_CONTENT_CHARS};
pub use request_shape::{validate_request_shape, SignatureHeaders, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use verifier::{signed_message, SignatureVerifier, Verification};
