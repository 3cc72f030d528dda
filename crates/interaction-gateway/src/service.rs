//! Interaction gateway service - main entry point.
//!
//! One HTTP listener serving the interaction route plus `/health` and
//! `/metrics`. Every interaction request runs shape check, then signature
//! verification, then dispatch; the first failure short-circuits.

use crate::domain::config::GatewayConfig;
use crate::domain::dispatcher::InteractionDispatcher;
use crate::domain::error::{GatewayError, InteractionError};
use crate::domain::interaction::InteractionResponse;
use crate::domain::request_shape::validate_request_shape;
use crate::domain::verifier::SignatureVerifier;
use crate::middleware::{InteractionMetrics, RequestTimer, TracingLayer};
use crate::ports::outbound::ReplyGenerator;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tracing::{debug, info, warn};

/// Interaction gateway service state
pub struct InteractionGatewayService {
    config: GatewayConfig,
    verifier: Arc<SignatureVerifier>,
    dispatcher: InteractionDispatcher,
    metrics: Arc<InteractionMetrics>,
    shutdown: Arc<Notify>,
}

impl InteractionGatewayService {
    /// Create a new gateway service
    pub fn new(
        config: GatewayConfig,
        generator: Arc<dyn ReplyGenerator>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let verifier = Arc::new(SignatureVerifier::from_hex(&config.discord.public_key));
        let metrics = Arc::new(InteractionMetrics::new());

        info!(generator = generator.name(), "Reply generator selected");
        let dispatcher = InteractionDispatcher::new(generator).with_metrics(Arc::clone(&metrics));

        Ok(Self {
            config,
            verifier,
            dispatcher,
            metrics,
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn start(&self) -> Result<(), GatewayError> {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until [`ShutdownHandle::shutdown`]
    /// is called or the process receives Ctrl-C.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), GatewayError> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(
            addr = %local_addr,
            route = %self.config.http.route,
            "Interaction gateway listening"
        );

        let shutdown = Arc::clone(&self.shutdown);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.notified() => info!("Received shutdown signal"),
                    _ = ctrl_c() => info!("Received Ctrl-C"),
                }
            })
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("Interaction gateway stopped");
        Ok(())
    }

    /// Handle that stops a running [`serve`](Self::serve)
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<InteractionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let state = AppState {
            verifier: Arc::clone(&self.verifier),
            dispatcher: self.dispatcher.clone(),
            metrics: Arc::clone(&self.metrics),
            max_body_bytes: self.config.limits.max_body_bytes,
        };

        let middleware = ServiceBuilder::new().layer(TracingLayer::new());

        Router::new()
            .route(&self.config.http.route, any(handle_interaction))
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_snapshot))
            .layer(middleware)
            .with_state(state)
    }
}

/// Stops a running gateway. Cheap to clone.
#[derive(Clone)]
pub struct ShutdownHandle(Arc<Notify>);

impl ShutdownHandle {
    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        self.0.notify_one();
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    verifier: Arc<SignatureVerifier>,
    dispatcher: InteractionDispatcher,
    metrics: Arc<InteractionMetrics>,
    max_body_bytes: usize,
}

impl IntoResponse for InteractionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Handle one interaction request, whatever its method
async fn handle_interaction(
    State(state): State<AppState>,
    request: Request,
) -> InteractionResponse {
    let timer = RequestTimer::new(Arc::clone(&state.metrics));

    let response = match process_interaction(&state, request).await {
        Ok(response) => response,
        Err(e) => {
            state.metrics.record_rejection(e.kind());
            match &e {
                InteractionError::UnparsableBody { reason } => {
                    debug!(kind = e.kind(), reason = %reason, "Interaction rejected")
                }
                _ => debug!(kind = e.kind(), status = e.status(), "Interaction rejected"),
            }
            e.into()
        }
    };

    timer.finish(&response);
    response
}

/// The body is not read until method and headers check out.
async fn process_interaction(
    state: &AppState,
    request: Request,
) -> Result<InteractionResponse, InteractionError> {
    let (parts, body) = request.into_parts();
    let signature = validate_request_shape(&parts.method, &parts.headers)?;

    let body = to_bytes(body, state.max_body_bytes).await.map_err(|e| {
        debug!(error = %e, limit = state.max_body_bytes, "Request body not buffered");
        InteractionError::BodyTooLarge {
            limit: state.max_body_bytes,
        }
    })?;

    let verification = state
        .verifier
        .verify(signature.signature, signature.timestamp, body);
    if !verification.valid {
        return Err(InteractionError::InvalidSignature);
    }

    state.dispatcher.dispatch(&verification.body).await
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "interaction-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}
