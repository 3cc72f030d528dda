//! Gateway error types.
//!
//! Every request-scope failure is an [`InteractionError`] and is answered with
//! `{"error": <message>}` and the status from [`InteractionError::status`].
//! None of them outlive the request that produced them.

/// HTTP status codes used by the interaction endpoint.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const PAYLOAD_TOO_LARGE: u16 = 413;
}

/// Message sent for every failed signature check. Deliberately generic.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// Message sent for interaction types this endpoint does not handle.
pub const BAD_REQUEST_MESSAGE: &str = "bad request";

/// Request-scope failures, in the order the pipeline can produce them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// Wrong method or missing signature headers
    #[error("{message}")]
    MalformedRequest { status: u16, message: String },

    /// Signature did not verify, for any reason
    #[error("{}", INVALID_REQUEST_MESSAGE)]
    InvalidSignature,

    /// Shape was fine but the body exceeded the configured limit
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Verified body is not a well-formed interaction
    #[error("invalid interaction payload")]
    UnparsableBody { reason: String },

    /// Verified and parsed, but neither Ping nor ApplicationCommand
    #[error("{}", BAD_REQUEST_MESSAGE)]
    UnknownInteractionType(i64),

    /// ApplicationCommand without the option the command is registered with
    #[error("missing option '{0}'")]
    MissingOption(String),
}

impl InteractionError {
    /// Wrong method or missing header
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            status: status::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Body failed to deserialize
    pub fn unparsable(reason: impl Into<String>) -> Self {
        Self::UnparsableBody {
            reason: reason.into(),
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> u16 {
        match self {
            Self::MalformedRequest { status, .. } => *status,
            Self::InvalidSignature => status::UNAUTHORIZED,
            Self::BodyTooLarge { .. } => status::PAYLOAD_TOO_LARGE,
            Self::UnparsableBody { .. }
            | Self::UnknownInteractionType(_)
            | Self::MissingOption(_) => status::BAD_REQUEST,
        }
    }

    /// Text placed in the `error` field of the response body
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Metric/log label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRequest { .. } => "malformed_request",
            Self::InvalidSignature => "invalid_signature",
            Self::BodyTooLarge { .. } => "oversized_body",
            Self::UnparsableBody { .. } => "unparsable_body",
            Self::UnknownInteractionType(_) => "unknown_interaction_type",
            Self::MissingOption(_) => "missing_option",
        }
    }
}

impl From<serde_json::Error> for InteractionError {
    fn from(e: serde_json::Error) -> Self {
        InteractionError::unparsable(e.to_string())
    }
}

/// Gateway-level errors (startup and serving, never sent to a client)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] crate::domain::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Completion client could not be built
    #[error("completion client error: {0}")]
    Completion(String),

    /// Serving loop failed
    #[error("server error: {0}")]
    Serve(String),
}
