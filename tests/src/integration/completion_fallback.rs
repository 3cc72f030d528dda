//! # Completion Fallback
//!
//! Gateway wired to a [`ChatCompletionClient`] pointed at a stub upstream.
//! Whatever the upstream does, an application command still gets a 200
//! channel message: the generated reply when it works, the query otherwise.
//!
//! [`ChatCompletionClient`]: interaction_gateway::ChatCompletionClient

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode as UpstreamStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use interaction_gateway::domain::interaction::MAX_CONTENT_CHARS;
    use interaction_gateway::{ChatCompletionClient, CompletionConfig, GatewayConfig};
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    use crate::fixtures::{app_keypair, RunningGateway};

    const TIMESTAMP: &str = "1700000000";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Serve `router` on a loopback port and return its completions URL
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/chat/completions", addr)
    }

    async fn gateway_with_upstream(endpoint: String, timeout: Duration) -> RunningGateway {
        let mut completion = CompletionConfig::new("sk-test");
        completion.endpoint = endpoint;
        completion.timeout = timeout;

        let mut config = GatewayConfig::new(app_keypair().public_key().to_hex());
        config.completion = Some(completion.clone());

        let client = ChatCompletionClient::new(completion).unwrap();
        RunningGateway::start(config, Arc::new(client)).await
    }

    fn command(query: &str) -> String {
        json!({"type": 2, "data": {"options": [{"name": "name", "value": query}]}}).to_string()
    }

    async fn content_of(response: reqwest::Response) -> String {
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], 4);
        body["data"]["content"].as_str().unwrap().to_string()
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_generated_reply_is_sent() {
        let upstream = spawn_upstream(Router::new().route(
            "/v1/chat/completions",
            post(|Json(request): Json<Value>| async move {
                let query = request["messages"][1]["content"].as_str().unwrap_or_default();
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": format!("answer to {}", query)}}]
                }))
            }),
        ))
        .await;
        let gateway = gateway_with_upstream(upstream, Duration::from_secs(5)).await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, &command("life"))
            .await;
        assert_eq!(content_of(response).await, "answer to life");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_upstream_error_falls_back_to_echo() {
        let upstream = spawn_upstream(Router::new().route(
            "/v1/chat/completions",
            post(|| async { (UpstreamStatus::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let gateway = gateway_with_upstream(upstream, Duration::from_secs(5)).await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, &command("still here"))
            .await;
        assert_eq!(content_of(response).await, "still here");

        let metrics: Value = reqwest::get(gateway.url("/metrics"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(metrics["completion"]["fallbacks"], 1);

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_slow_upstream_falls_back_to_echo() {
        let upstream = spawn_upstream(Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"choices": [{"message": {"content": "too late"}}]}))
            }),
        ))
        .await;
        let gateway = gateway_with_upstream(upstream, Duration::from_millis(200)).await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, &command("quick"))
            .await;
        assert_eq!(content_of(response).await, "quick");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_long_reply_truncated() {
        let upstream = spawn_upstream(Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(json!({"choices": [{"message": {"content": "ab".repeat(MAX_CONTENT_CHARS)}}]}))
            }),
        ))
        .await;
        let gateway = gateway_with_upstream(upstream, Duration::from_secs(5)).await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, &command("essay"))
            .await;
        assert_eq!(content_of(response).await.chars().count(), MAX_CONTENT_CHARS);

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_ping_never_calls_upstream() {
        // A call here would fail and show up as a fallback
        let upstream = spawn_upstream(Router::new().route(
            "/v1/chat/completions",
            post(|| async { UpstreamStatus::IM_A_TEAPOT }),
        ))
        .await;
        let gateway = gateway_with_upstream(upstream, Duration::from_secs(5)).await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, r#"{"type":1}"#)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let metrics: Value = reqwest::get(gateway.url("/metrics"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(metrics["completion"]["fallbacks"], 0);

        gateway.stop().await;
    }
}
