//! Request shape validation.
//!
//! First gate of the pipeline: POST only, and both signature headers present.
//! Nothing here looks at the body.

use crate::domain::error::InteractionError;
use axum::http::{HeaderMap, Method};

/// Hex-encoded Ed25519 signature over `timestamp ++ body`
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";

/// Timestamp Discord prepended to the body before signing
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Signature material lifted from a well-formed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureHeaders<'a> {
    pub signature: &'a str,
    pub timestamp: &'a str,
}

/// Check method and required headers.
///
/// Header names are matched case-insensitively. A header that is present but
/// empty, or not visible ASCII, counts as missing.
pub fn validate_request_shape<'a>(
    method: &Method,
    headers: &'a HeaderMap,
) -> Result<SignatureHeaders<'a>, InteractionError> {
    if *method != Method::POST {
        return Err(InteractionError::malformed(format!(
            "method {} is not allowed for the URL",
            method
        )));
    }

    let signature = required_header(headers, SIGNATURE_HEADER)?;
    let timestamp = required_header(headers, TIMESTAMP_HEADER)?;

    Ok(SignatureHeaders {
        signature,
        timestamp,
    })
}

fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, InteractionError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| InteractionError::malformed(format!("header '{}' not available", name)))
}
