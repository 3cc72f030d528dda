//! # Shared Crypto - Ed25519 Primitives
//!
//! Value types around `ed25519-dalek` used to authenticate inbound Discord
//! interaction callbacks.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Detached signature verification |
//! | `errors` | - | Decoding and verification failures |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - Hex decoding is strict: wrong length or bad digits never reach the curve code

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use signatures::{
    Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
