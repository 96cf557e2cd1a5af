//! Fallback orchestration tests against mock providers

use crate::*;
use gateway_core::{FailureReason, GatewayError};
use gateway_routing::CancellationToken;
use gateway_telemetry::GatewayMetrics;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::MockServer;

#[tokio::test]
async fn test_first_success_wins() {
    let server = MockServer::start().await;
    mock_chat_success(&server, "alpha", "alpha-model", "from alpha").await;
    mock_chat_success(&server, "beta", "beta-model", "from beta").await;

    let gateway = build_gateway(
        vec![chat_provider(&server.uri(), "alpha", 1), chat_provider(&server.uri(), "beta", 2)],
        credentials_for(&["alpha", "beta"]),
        2,
    );

    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.text, "from alpha");
    assert_eq!(result.provider_name, "alpha");
    assert_eq!(result.model_used, "alpha-model");
    assert_eq!(request_order(&server).await, vec!["alpha"]);
}

#[tokio::test]
async fn test_priority_order_is_respected() {
    let server = MockServer::start().await;
    mock_chat_status(&server, "a", 503).await;
    mock_chat_status(&server, "b", 429).await;
    mock_chat_success(&server, "c", "c-model", "from c").await;

    // Registered out of order on purpose
    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "c", 3),
            chat_provider(&server.uri(), "a", 1),
            chat_provider(&server.uri(), "b", 2),
        ],
        credentials_for(&["a", "b", "c"]),
        2,
    );

    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.provider_name, "c");
    assert_eq!(request_order(&server).await, vec!["a", "a", "b", "c"]);
}

#[tokio::test]
async fn test_rate_limit_fails_fast() {
    for status in [429, 402] {
        let server = MockServer::start().await;
        mock_chat_status(&server, "limited", status).await;
        mock_chat_success(&server, "backup", "backup-model", "ok").await;

        let gateway = build_gateway(
            vec![
                chat_provider(&server.uri(), "limited", 1),
                chat_provider(&server.uri(), "backup", 2),
            ],
            credentials_for(&["limited", "backup"]),
            5,
        );

        let result = gateway.generate(sample_request()).await.unwrap();

        assert_eq!(result.provider_name, "backup");
        assert_eq!(calls_to(&server, "limited").await, 1, "status {status}");
    }
}

#[tokio::test]
async fn test_transient_errors_use_retry_budget() {
    let server = MockServer::start().await;
    mock_chat_status(&server, "flaky", 500).await;
    mock_chat_success(&server, "backup", "backup-model", "ok").await;

    let gateway = build_gateway(
        vec![chat_provider(&server.uri(), "flaky", 1), chat_provider(&server.uri(), "backup", 2)],
        credentials_for(&["flaky", "backup"]),
        3,
    );

    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.provider_name, "backup");
    assert_eq!(calls_to(&server, "flaky").await, 3);
    assert_eq!(calls_to(&server, "backup").await, 1);
}

#[tokio::test]
async fn test_empty_content_falls_back() {
    let server = MockServer::start().await;
    mock_chat_raw(&server, "hollow", json!({"choices": [{"message": {"content": null}}]})).await;
    mock_chat_raw(&server, "odd", json!({"unexpected": "shape"})).await;
    mock_chat_success(&server, "solid", "solid-model", "actual text").await;

    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "hollow", 1),
            chat_provider(&server.uri(), "odd", 2),
            chat_provider(&server.uri(), "solid", 3),
        ],
        credentials_for(&["hollow", "odd", "solid"]),
        2,
    );

    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.text, "actual text");
    assert_eq!(result.provider_name, "solid");
    // A 2xx is never retried on the same provider
    assert_eq!(request_order(&server).await, vec!["hollow", "odd", "solid"]);
}

#[tokio::test]
async fn test_all_rate_limited_is_exhausted() {
    let server = MockServer::start().await;
    for name in ["one", "two", "three"] {
        mock_chat_status(&server, name, 429).await;
    }

    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "one", 1),
            chat_provider(&server.uri(), "two", 2),
            chat_provider(&server.uri(), "three", 3),
        ],
        credentials_for(&["one", "two", "three"]),
        2,
    );

    let error = gateway.generate(sample_request()).await.unwrap_err();

    assert_eq!(error.error_type(), "all_providers_exhausted");
    match &error {
        GatewayError::AllProvidersExhausted {
            providers_attempted,
            last_status,
            failures,
        } => {
            assert_eq!(*providers_attempted, 3);
            assert_eq!(*last_status, Some(429));
            let names: Vec<&str> = failures.iter().map(|f| f.provider.as_str()).collect();
            assert_eq!(names, vec!["one", "two", "three"]);
            assert!(failures
                .iter()
                .all(|f| f.reason == FailureReason::RateLimited { status: 429 }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(request_order(&server).await, vec!["one", "two", "three"]);

    let body = error.to_body();
    assert_eq!(body["error"]["type"], "all_providers_exhausted");
    assert_eq!(body["error"]["providers_attempted"], 3);
}

#[tokio::test]
async fn test_missing_credentials_are_skipped() {
    let server = MockServer::start().await;
    mock_chat_success(&server, "unkeyed", "unkeyed-model", "should not be called").await;
    mock_chat_success(&server, "keyed", "keyed-model", "from keyed").await;

    let gateway = build_gateway(
        vec![chat_provider(&server.uri(), "unkeyed", 1), chat_provider(&server.uri(), "keyed", 2)],
        credentials_for(&["keyed"]),
        2,
    );

    let started = Instant::now();
    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.provider_name, "keyed");
    assert_eq!(request_order(&server).await, vec!["keyed"]);
    // No backoff is spent on a skipped provider
    assert!(started.elapsed() < TEST_BASE_DELAY * 4);
}

#[tokio::test]
async fn test_no_credentials_at_all() {
    let server = MockServer::start().await;
    let gateway = build_gateway(
        vec![chat_provider(&server.uri(), "a", 1), chat_provider(&server.uri(), "b", 2)],
        credentials_for(&[]),
        2,
    );

    let error = gateway.generate(sample_request()).await.unwrap_err();

    assert_eq!(error.providers_attempted(), Some(2));
    assert!(request_order(&server).await.is_empty());
}

/// Primary always 429, secondary 500 then 200, N=2
#[tokio::test]
async fn test_scenario_fast_fail_then_retry_success() {
    let server = MockServer::start().await;
    mock_chat_status(&server, "primary", 429).await;
    mock_chat_status_times(&server, "secondary", 500, 1).await;
    mock_chat_success(&server, "secondary", "secondary-model", "recovered").await;

    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "primary", 1),
            chat_provider(&server.uri(), "secondary", 2),
        ],
        credentials_for(&["primary", "secondary"]),
        2,
    );

    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.text, "recovered");
    assert_eq!(result.provider_name, "secondary");
    assert_eq!(result.model_used, "secondary-model");
    assert_eq!(calls_to(&server, "primary").await, 1);
    assert_eq!(calls_to(&server, "secondary").await, 2);
    assert_eq!(
        request_order(&server).await,
        vec!["primary", "secondary", "secondary"]
    );
}

/// Single provider timing out on every attempt, N=2
#[tokio::test]
async fn test_scenario_timeouts_exhaust() {
    let server = MockServer::start().await;
    mock_chat_hang(&server, "only", Duration::from_secs(5)).await;

    let gateway = build_gateway(
        vec![chat_provider(&server.uri(), "only", 1)],
        credentials_for(&["only"]),
        2,
    );

    let started = Instant::now();
    let error = gateway.generate(sample_request()).await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(calls_to(&server, "only").await, 2);
    // Two timed-out calls plus one backoff
    assert!(elapsed >= TEST_TIMEOUT * 2 + TEST_BASE_DELAY);
    assert!(elapsed < Duration::from_secs(5));

    match error {
        GatewayError::AllProvidersExhausted {
            providers_attempted,
            last_status,
            failures,
        } => {
            assert_eq!(providers_attempted, 1);
            assert_eq!(last_status, None);
            match &failures[0].reason {
                FailureReason::Transient {
                    status,
                    network_error,
                    attempts,
                } => {
                    assert_eq!(*status, None);
                    assert!(network_error.as_deref().unwrap_or_default().contains("timed out"));
                    assert_eq!(*attempts, 2);
                }
                other => panic!("unexpected reason: {other:?}"),
            }
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancellation_stops_the_chain() {
    let server = MockServer::start().await;
    mock_chat_hang(&server, "slow", Duration::from_millis(250)).await;
    mock_chat_success(&server, "never", "never-model", "unreachable").await;

    let gateway = build_gateway(
        vec![chat_provider(&server.uri(), "slow", 1), chat_provider(&server.uri(), "never", 2)],
        credentials_for(&["slow", "never"]),
        2,
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let error = gateway
        .generate_with_cancellation(sample_request(), &cancel)
        .await
        .unwrap_err();

    assert_eq!(error, GatewayError::Cancelled { providers_attempted: 1 });
    assert!(started.elapsed() < Duration::from_millis(250));
    assert_eq!(calls_to(&server, "never").await, 0);
}

#[tokio::test]
async fn test_invalid_request_contacts_nobody() {
    let server = MockServer::start().await;
    mock_chat_success(&server, "a", "a-model", "text").await;

    let gateway = build_gateway(vec![chat_provider(&server.uri(), "a", 1)], credentials_for(&["a"]), 2);

    let mut request = sample_request();
    request.user_prompt = "   ".to_string();
    let error = gateway.generate(request).await.unwrap_err();

    assert_eq!(error.error_type(), "invalid_request");
    assert!(request_order(&server).await.is_empty());
}

#[tokio::test]
async fn test_metrics_follow_the_chain() {
    let server = MockServer::start().await;
    mock_chat_status(&server, "limited", 429).await;
    mock_chat_success(&server, "working", "working-model", "ok").await;

    let metrics = GatewayMetrics::new().unwrap();
    let gateway = build_gateway_with_metrics(
        vec![
            chat_provider(&server.uri(), "limited", 1),
            chat_provider(&server.uri(), "working", 2),
        ],
        credentials_for(&["limited", "working"]),
        2,
        Some(metrics.clone()),
    );

    gateway.generate(sample_request()).await.unwrap();

    assert_eq!(metrics.provider_count("limited", "rate_limited"), 1);
    assert_eq!(metrics.provider_count("working", "success"), 1);
    assert_eq!(metrics.request_count("success"), 1);
    assert!(metrics.render().unwrap().contains("generation_gateway_requests_total"));
}
