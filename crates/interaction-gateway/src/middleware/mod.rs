//! Middleware for the interaction gateway.
//!
//! Layer order: Request → Tracing → BodyLimit → Handler

pub mod metrics;
pub mod tracing;

pub use self::metrics::{InteractionMetrics, RequestTimer};
pub use self::tracing::TracingLayer;
