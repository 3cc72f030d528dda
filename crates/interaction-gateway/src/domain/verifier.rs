//! # Signature Verifier
//!
//! Discord signs `timestamp ++ body` with the application's Ed25519 key and
//! sends the hex signature in `X-Signature-Ed25519`. This module checks that
//! signature against the configured public key.
//!
//! ## Security
//!
//! - **Fail closed**: malformed hex, wrong lengths, a non-curve public key and
//!   a cryptographic mismatch all produce `valid = false`. Nothing here panics
//!   or returns an error the caller could mistake for success.
//! - The body is carried through as raw bytes and never interpreted here.

use bytes::Bytes;
use shared_crypto::{CryptoError, Ed25519PublicKey, Ed25519Signature};
use tracing::{debug, warn};

/// Result of checking one request.
///
/// `body` is returned whether or not the signature held; callers must not
/// parse it unless `valid` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub valid: bool,
    pub body: Bytes,
}

/// Verifies interaction signatures against one process-wide public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: Option<Ed25519PublicKey>,
}

impl SignatureVerifier {
    pub fn new(public_key: Ed25519PublicKey) -> Self {
        Self {
            public_key: Some(public_key),
        }
    }

    /// Build from the configured hex key.
    ///
    /// A key that does not decode leaves the verifier in a state where every
    /// request is rejected.
    pub fn from_hex(public_key_hex: &str) -> Self {
        match Ed25519PublicKey::from_hex(public_key_hex) {
            Ok(key) => Self::new(key),
            Err(e) => {
                warn!(
                    error = %e,
                    "Configured public key is unusable, all interactions will be rejected"
                );
                Self { public_key: None }
            }
        }
    }

    /// Check `signature_hex` over `timestamp ++ body`.
    pub fn verify(&self, signature_hex: &str, timestamp: &str, body: Bytes) -> Verification {
        let valid = match self.check(signature_hex, timestamp, &body) {
            Ok(()) => {
                debug!(timestamp, body_len = body.len(), "Signature verified");
                true
            }
            Err(e) => {
                warn!(reason = %e, timestamp, "Signature rejected");
                false
            }
        };

        Verification { valid, body }
    }

    fn check(&self, signature_hex: &str, timestamp: &str, body: &[u8]) -> Result<(), CryptoError> {
        let public_key = self.public_key.as_ref().ok_or(CryptoError::InvalidPublicKey)?;
        let signature = Ed25519Signature::from_hex(signature_hex)?;
        public_key.verify(&signed_message(timestamp, body), &signature)
    }
}

/// `timestamp ++ body`, the exact byte string Discord signs.
pub fn signed_message(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);
    message
}
