//! Interaction metrics.
//!
//! Plain atomic counters, exported as JSON on `/metrics`.

use crate::domain::interaction::InteractionResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters for the interaction endpoint
#[derive(Debug, Default)]
pub struct InteractionMetrics {
    // Request outcomes
    pub requests_total: AtomicU64,
    pub pongs: AtomicU64,
    pub channel_messages: AtomicU64,

    // Rejections, in pipeline order
    pub malformed_requests: AtomicU64,
    pub invalid_signatures: AtomicU64,
    pub oversized_bodies: AtomicU64,
    pub unparsable_bodies: AtomicU64,
    pub unknown_types: AtomicU64,
    pub missing_options: AtomicU64,

    // Reply generation
    pub completion_fallbacks: AtomicU64,

    // Latency tracking
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl InteractionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one request
    pub fn record_response(&self, response: &InteractionResponse, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        match response {
            InteractionResponse::Pong => {
                self.pongs.fetch_add(1, Ordering::Relaxed);
            }
            InteractionResponse::ChannelMessage { .. } => {
                self.channel_messages.fetch_add(1, Ordering::Relaxed);
            }
            InteractionResponse::Error { .. } => {}
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejection by its error kind label
    pub fn record_rejection(&self, kind: &str) {
        let counter = match kind {
            "malformed_request" => &self.malformed_requests,
            "invalid_signature" => &self.invalid_signatures,
            "oversized_body" => &self.oversized_bodies,
            "unparsable_body" => &self.unparsable_bodies,
            "unknown_interaction_type" => &self.unknown_types,
            "missing_option" => &self.missing_options,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a reply generator failure answered by echo
    pub fn record_completion_fallback(&self) {
        self.completion_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "pong": self.pongs.load(Ordering::Relaxed),
                "channel_message": self.channel_messages.load(Ordering::Relaxed),
            },
            "rejected": {
                "malformed_request": self.malformed_requests.load(Ordering::Relaxed),
                "invalid_signature": self.invalid_signatures.load(Ordering::Relaxed),
                "oversized_body": self.oversized_bodies.load(Ordering::Relaxed),
                "unparsable_body": self.unparsable_bodies.load(Ordering::Relaxed),
                "unknown_interaction_type": self.unknown_types.load(Ordering::Relaxed),
                "missing_option": self.missing_options.load(Ordering::Relaxed),
            },
            "completion": {
                "fallbacks": self.completion_fallbacks.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<InteractionMetrics>,
}

impl RequestTimer {
    pub fn new(metrics: Arc<InteractionMetrics>) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn finish(self, response: &InteractionResponse) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics.record_response(response, latency_ms);
    }
}
