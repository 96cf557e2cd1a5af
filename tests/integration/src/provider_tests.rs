//! Wire-level tests for each provider API style

use crate::*;
use gateway_core::{FailureReason, GatewayError, QualityHint};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_chat_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(chat_path("chat")))
        .and(header("authorization", "Bearer sk-chat-secret"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "chat-model",
            "messages": [
                {"role": "system", "content": "Reply in JSON."},
                {"role": "user", "content": "List two colors."}
            ],
            "max_tokens": 128,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_body("chat-model", "```json\n[\"red\", \"blue\"]\n```")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = build_gateway(vec![chat_provider(&server.uri(), "chat", 1)], credentials_for(&["chat"]), 2);

    let request = gateway_core::GenerationRequest::new("Reply in JSON.", "List two colors.", 128)
        .with_json_response(true);
    let result = gateway.generate(request).await.unwrap();

    assert_eq!(result.text, r#"["red", "blue"]"#);
    assert_eq!(result.model_used, "chat-model");
}

#[tokio::test]
async fn test_generate_content_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/v1beta/models/gemini-flash:generateContent"))
        .and(query_param("key", "sk-gemini-secret"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Be terse.\n\nSay hi."}]}],
            "generationConfig": {"maxOutputTokens": 32, "temperature": 0.5}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_content_body("hi")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = build_gateway(
        vec![generate_content_provider(&server.uri(), "gemini", 1)],
        credentials_for(&["gemini"]),
        2,
    );

    let request = gateway_core::GenerationRequest::new("Be terse.", "Say hi.", 32).with_temperature(0.5);
    let result = gateway.generate(request).await.unwrap();

    assert_eq!(result.text, "hi");
    assert_eq!(result.provider_name, "gemini");
    assert_eq!(result.model_used, "gemini-flash");

    // The key travels in the query string, never as a bearer header
    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_premium_hint_selects_premium_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_content_body("deep answer")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(chat_path("chat")))
        .and(body_partial_json(json!({"model": "chat-large"})))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "chat", 1).with_premium_model("chat-large"),
            generate_content_provider(&server.uri(), "gemini", 2).with_premium_model("gemini-pro"),
        ],
        credentials_for(&["chat", "gemini"]),
        2,
    );

    let result = gateway
        .generate(sample_request().with_quality(QualityHint::Premium))
        .await
        .unwrap();

    assert_eq!(result.provider_name, "gemini");
    assert_eq!(result.model_used, "gemini-pro");
}

#[tokio::test]
async fn test_premium_hint_without_premium_model_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(chat_path("chat")))
        .and(body_partial_json(json!({"model": "chat-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("chat-model", "ok")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = build_gateway(vec![chat_provider(&server.uri(), "chat", 1)], credentials_for(&["chat"]), 2);

    let result = gateway
        .generate(sample_request().with_quality(QualityHint::Premium))
        .await
        .unwrap();

    assert_eq!(result.model_used, "chat-model");
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(chat_path("router")))
        .and(header("HTTP-Referer", "https://example.test"))
        .and(header("X-Title", "Integration Suite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("router-model", "ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = chat_provider(&server.uri(), "router", 1)
        .with_header("HTTP-Referer", "https://example.test")
        .with_header("X-Title", "Integration Suite");
    let gateway = build_gateway(vec![provider], credentials_for(&["router"]), 2);

    let result = gateway.generate(sample_request()).await.unwrap();
    assert_eq!(result.text, "ok");
}

#[tokio::test]
async fn test_mixed_api_styles_in_one_chain() {
    let server = MockServer::start().await;
    mock_chat_status(&server, "managed", 402).await;
    mock_chat_status(&server, "router", 429).await;
    mock_generate_content_success(&server, "gemini", "from gemini").await;

    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "managed", 1),
            chat_provider(&server.uri(), "router", 2),
            generate_content_provider(&server.uri(), "gemini", 3),
        ],
        credentials_for(&["managed", "router", "gemini"]),
        2,
    );

    let result = gateway.generate(sample_request()).await.unwrap();

    assert_eq!(result.text, "from gemini");
    assert_eq!(result.provider_name, "gemini");
    assert_eq!(request_order(&server).await, vec!["managed", "router", "gemini"]);
}

#[tokio::test]
async fn test_generate_content_without_text_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/v1beta/models/gemini-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        })))
        .mount(&server)
        .await;

    let gateway = build_gateway(
        vec![generate_content_provider(&server.uri(), "gemini", 1)],
        credentials_for(&["gemini"]),
        2,
    );

    let error = gateway.generate(sample_request()).await.unwrap_err();

    match error {
        GatewayError::AllProvidersExhausted {
            providers_attempted,
            last_status,
            failures,
        } => {
            assert_eq!(providers_attempted, 1);
            assert_eq!(last_status, Some(200));
            assert_eq!(failures[0].reason, FailureReason::EmptyContent { status: 200 });
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(calls_to(&server, "gemini").await, 1);
}

#[tokio::test]
async fn test_secrets_never_leak_into_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/v1beta/models/gemini-flash:generateContent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mock_chat_status(&server, "chat", 500).await;

    let gateway = build_gateway(
        vec![
            chat_provider(&server.uri(), "chat", 1),
            generate_content_provider(&server.uri(), "gemini", 2),
        ],
        credentials_for(&["chat", "gemini"]),
        2,
    );

    let error = gateway.generate(sample_request()).await.unwrap_err();
    let rendered = format!("{error} {error:?} {}", error.to_body());

    for name in ["chat", "gemini"] {
        assert!(!rendered.contains(&secret_for(name)), "secret for {name} leaked");
    }
}
