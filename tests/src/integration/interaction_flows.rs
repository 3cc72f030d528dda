//! # Interaction Flows
//!
//! Signed requests against a live gateway on a loopback port.
//!
//! ## Flows Tested:
//!
//! 1. **Ping**: signed `{type: 1}` gets `{type: 1}`
//! 2. **Application command**: the `name` option is echoed back as content
//! 3. **Replay**: the same signed request twice gets the same response
//! 4. **Rejections**: wrong method and missing headers (400), bad signature
//!    (401, body never parsed), unknown type (400), oversized body (413)

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use interaction_gateway::domain::request_shape::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
    use interaction_gateway::{EchoReplyGenerator, GatewayConfig};
    use proptest::prelude::*;
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use shared_crypto::Ed25519KeyPair;

    use crate::fixtures::{app_keypair, sign, RunningGateway};

    const TIMESTAMP: &str = "1700000000";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn config() -> GatewayConfig {
        GatewayConfig::new(app_keypair().public_key().to_hex())
    }

    async fn echo_gateway() -> RunningGateway {
        RunningGateway::start(config(), Arc::new(EchoReplyGenerator::new())).await
    }

    async fn json_body(response: reqwest::Response) -> Value {
        response.json().await.unwrap()
    }

    // =============================================================================
    // SUCCESSFUL FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_signed_ping_gets_pong() {
        let gateway = echo_gateway().await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, r#"{"type":1}"#)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );
        assert_eq!(json_body(response).await, json!({"type": 1}));

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_signed_command_echoes_name_option() {
        let gateway = echo_gateway().await;
        let body = json!({
            "id": "1",
            "type": 2,
            "token": "interaction-token",
            "data": {
                "name": "ask",
                "options": [{"name": "name", "type": 3, "value": "hello there"}]
            }
        });

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, &body.to_string())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"type": 4, "data": {"content": "hello there"}})
        );

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_identical_requests_get_identical_responses() {
        let gateway = echo_gateway().await;
        let command = json!({"type": 2, "data": {"options": [{"name": "name", "value": "twice"}]}});

        for body in [r#"{"type":1}"#.to_string(), command.to_string()] {
            let first = gateway.post_signed(&app_keypair(), TIMESTAMP, &body).await;
            let second = gateway.post_signed(&app_keypair(), TIMESTAMP, &body).await;

            assert_eq!(first.status(), StatusCode::OK);
            assert_eq!(first.status(), second.status());
            assert_eq!(json_body(first).await, json_body(second).await);
        }

        gateway.stop().await;
    }

    // =============================================================================
    // REJECTIONS
    // =============================================================================

    #[tokio::test]
    async fn test_non_post_methods_rejected() {
        let gateway = echo_gateway().await;
        let client = reqwest::Client::new();

        for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
            let response = client
                .request(method.clone(), gateway.interaction_url())
                .header(SIGNATURE_HEADER, "00")
                .header(TIMESTAMP_HEADER, TIMESTAMP)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(response).await,
                json!({"error": format!("method {} is not allowed for the URL", method)})
            );
        }

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_missing_timestamp_header() {
        let gateway = echo_gateway().await;
        let body = r#"{"type":1}"#;

        let response = reqwest::Client::new()
            .post(gateway.interaction_url())
            .header(SIGNATURE_HEADER, sign(&app_keypair(), TIMESTAMP, body.as_bytes()))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "header 'X-Signature-Timestamp' not available"})
        );

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_foreign_key_rejected() {
        let gateway = echo_gateway().await;
        let intruder = Ed25519KeyPair::from_seed([0x01; 32]);

        let response = gateway
            .post_signed(&intruder, TIMESTAMP, r#"{"type":1}"#)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await, json!({"error": "Invalid request"}));

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_replayed_signature_on_other_body_rejected() {
        let gateway = echo_gateway().await;
        let signature = sign(&app_keypair(), TIMESTAMP, br#"{"type":1}"#);

        let response = reqwest::Client::new()
            .post(gateway.interaction_url())
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, TIMESTAMP)
            .body(r#"{"type":2,"data":{"options":[{"name":"name","value":"x"}]}}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_unparsable_body_only_reported_after_verification() {
        let gateway = echo_gateway().await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, "{not json")
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "invalid interaction payload"})
        );

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_unknown_type_and_missing_option() {
        let gateway = echo_gateway().await;

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, r#"{"type":3}"#)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": "bad request"}));

        let response = gateway
            .post_signed(&app_keypair(), TIMESTAMP, r#"{"type":2,"data":{"options":[]}}"#)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "missing option 'name'"})
        );

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = config();
        config.limits.max_body_bytes = 128;
        let gateway = RunningGateway::start(config, Arc::new(EchoReplyGenerator::new())).await;

        let body = json!({"type": 1, "padding": "x".repeat(1024)}).to_string();
        let response = gateway.post_signed(&app_keypair(), TIMESTAMP, &body).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json_body(response).await,
            json!({"error": "request body exceeds 128 bytes"})
        );

        gateway.stop().await;
    }

    // =============================================================================
    // OPERATIONAL ENDPOINTS
    // =============================================================================

    #[tokio::test]
    async fn test_health_and_metrics() {
        let gateway = echo_gateway().await;

        gateway
            .post_signed(&app_keypair(), TIMESTAMP, r#"{"type":1}"#)
            .await;
        gateway
            .post_signed(&Ed25519KeyPair::from_seed([0x02; 32]), TIMESTAMP, r#"{"type":1}"#)
            .await;

        let health = reqwest::get(gateway.url("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(json_body(health).await["status"], "ok");

        let metrics = json_body(reqwest::get(gateway.url("/metrics")).await.unwrap()).await;
        assert_eq!(metrics["requests"]["total"], 2);
        assert_eq!(metrics["requests"]["pong"], 1);
        assert_eq!(metrics["rejected"]["invalid_signature"], 1);

        gateway.stop().await;
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    /// One gateway shared by every proptest case
    fn shared_gateway() -> &'static (tokio::runtime::Runtime, String) {
        static GATEWAY: OnceLock<(tokio::runtime::Runtime, String)> = OnceLock::new();
        GATEWAY.get_or_init(|| {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let url = runtime.block_on(async {
                let gateway = echo_gateway().await;
                let url = gateway.interaction_url();
                // Left running for the life of the test binary
                std::mem::forget(gateway);
                url
            });
            (runtime, url)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_forged_requests_never_succeed(
            body in ".{0,256}",
            signature in "[0-9a-f]{128}",
            timestamp in "[0-9]{1,12}",
        ) {
            let (runtime, url) = shared_gateway();
            let status = runtime.block_on(async {
                reqwest::Client::new()
                    .post(url.as_str())
                    .header(SIGNATURE_HEADER, signature)
                    .header(TIMESTAMP_HEADER, timestamp)
                    .body(body)
                    .send()
                    .await
                    .unwrap()
                    .status()
            });
            prop_assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }
}
