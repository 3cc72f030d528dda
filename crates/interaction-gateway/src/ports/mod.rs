//! Ports for the interaction gateway.
//!
//! The only outbound dependency is whatever produces the reply text for an
//! application command.

pub mod outbound;

pub use outbound::{CompletionError, ReplyGenerator};
