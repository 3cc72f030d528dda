//! Adapters for the interaction gateway.
//!
//! Implementations of [`crate::ports::ReplyGenerator`].

pub mod completion;
pub mod echo;

pub use completion::ChatCompletionClient;
pub use echo::EchoReplyGenerator;
