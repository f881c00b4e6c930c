//! Routing, CORS and prompt selection, exercised against the mock provider.

mod common;

use axum::{body::Body, http::Method, http::StatusCode};
use comment_service::models::Role;
use comment_service::services::prompt_builder::{
    COMPANION_OPENING, COMPANION_PERSONA, REBUTTAL_PERSONA, SCORE_FEEDBACK_PERSONA,
};
use comment_service::services::providers::mock::MockChatProvider;
use comment_service::services::FALLBACK_COMMENT;
use common::{header, mock_router, post_json, send};
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn preflight_returns_cors_headers() {
    let provider = Arc::new(MockChatProvider::replying("unused"));

    for uri in ["/comment", "/", "/anything"] {
        let response = send(
            mock_router(provider.clone()),
            Method::OPTIONS,
            uri,
            Body::from("ignored body"),
        )
        .await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.is_empty());
        assert_eq!(header(&response, "access-control-allow-origin"), "*");
        assert!(header(&response, "access-control-allow-headers")
            .eq_ignore_ascii_case("content-type"));

        assert_eq!(
            header(&response, "access-control-allow-methods"),
            "POST, OPTIONS"
        );
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let provider = Arc::new(MockChatProvider::replying("unused"));

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(
            mock_router(provider.clone()),
            method.clone(),
            "/comment",
            Body::empty(),
        )
        .await;
        assert_eq!(
            response.status,
            StatusCode::METHOD_NOT_ALLOWED,
            "{} should be rejected",
            method
        );
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn score_feedback_uses_teacher_persona() {
    let provider = Arc::new(MockChatProvider::replying("哟，这次居然没考砸？😏"));

    let response = post_json(
        mock_router(provider.clone()),
        "/comment",
        &json!({"examType": "Math", "currentScore": 90, "historyScores": [70, 80]}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), "*");
    assert_eq!(response.json(), json!({"comment": "哟，这次居然没考砸？😏"}));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].system_prompt, SCORE_FEEDBACK_PERSONA);
    let content = calls[0].last_user_content().unwrap();
    assert!(content.contains("Math"));
    assert!(content.contains("90"));
    assert!(content.contains("70 -> 80"));
}

#[tokio::test]
async fn root_path_serves_the_same_handler() {
    let provider = Arc::new(MockChatProvider::replying("ok"));

    let response = post_json(
        mock_router(provider.clone()),
        "/",
        &json!({"examType": "Chemistry", "currentScore": 75, "historyScores": [80]}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(provider.calls()[0].system_prompt, SCORE_FEEDBACK_PERSONA);
}

#[tokio::test]
async fn rebuttal_embeds_previous_comment_and_rebuttal() {
    let provider = Arc::new(MockChatProvider::replying("嘴硬是没用的 😤"));

    let response = post_json(
        mock_router(provider.clone()),
        "/comment",
        &json!({
            "examType": "English",
            "currentScore": 88,
            "historyScores": [60, 70],
            "previousComment": "这分数，英语老师看了都沉默 🤐",
            "userRebuttal": "明明比上次高了18分！"
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["comment"], "嘴硬是没用的 😤");

    let calls = provider.calls();
    assert_eq!(calls[0].system_prompt, REBUTTAL_PERSONA);
    assert_eq!(calls[0].temperature, 1.3);
    let content = calls[0].last_user_content().unwrap();
    assert!(content.contains("这分数，英语老师看了都沉默 🤐"));
    assert!(content.contains("明明比上次高了18分！"));
}

#[tokio::test]
async fn companion_forwards_last_twelve_valid_entries() {
    let provider = Arc::new(MockChatProvider::replying("我在呢 🌱"));

    let mut history: Vec<Value> = Vec::new();
    for i in 0..15 {
        let role = if i % 2 == 0 { "user" } else { "assistant" };
        history.push(json!({"role": role, "content": format!("turn {}", i)}));
        // Interleave junk that must never be counted or forwarded
        history.push(json!({"role": "system", "content": format!("junk {}", i)}));
        history.push(json!({"role": "user", "content": ["not", "a", "string"]}));
    }

    let response = post_json(
        mock_router(provider.clone()),
        "/comment",
        &json!({
            "mode": "companion",
            "userMessage": "  明天就考试了  ",
            "conversationHistory": history
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);

    let calls = provider.calls();
    let payload = &calls[0];
    assert_eq!(payload.system_prompt, COMPANION_PERSONA);
    assert_eq!(payload.temperature, 0.9);
    assert_eq!(payload.max_tokens, 220);

    let (last, forwarded) = payload.messages.split_last().unwrap();
    let contents: Vec<&str> = forwarded.iter().map(|m| m.content.as_str()).collect();
    let expected: Vec<String> = (3..15).map(|i| format!("turn {}", i)).collect();
    assert_eq!(contents, expected);
    assert!(forwarded.iter().all(|m| m.role != Role::System));
    assert_eq!(last.role, Role::User);
    assert_eq!(last.content, "明天就考试了");
}

#[tokio::test]
async fn companion_without_message_sends_opening_prompt() {
    let provider = Arc::new(MockChatProvider::replying("你好呀"));

    let response = post_json(
        mock_router(provider.clone()),
        "/comment",
        &json!({"mode": "companion", "userMessage": ""}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        provider.calls()[0].last_user_content(),
        Some(COMPANION_OPENING)
    );
}

#[tokio::test]
async fn empty_completion_returns_fallback_comment() {
    let provider = Arc::new(MockChatProvider::empty());

    let response = post_json(
        mock_router(provider),
        "/comment",
        &json!({"examType": "Math", "currentScore": 90, "historyScores": []}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"comment": FALLBACK_COMMENT}));
}

#[tokio::test]
async fn malformed_json_is_a_500_with_error_field() {
    let provider = Arc::new(MockChatProvider::replying("unused"));

    let response = send(
        mock_router(provider.clone()),
        Method::POST,
        "/comment",
        Body::from("{\"examType\": "),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header(&response, "access-control-allow-origin"), "*");
    let body = response.json();
    assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
    assert!(body.get("comment").is_none());
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn unconfigured_provider_reports_configuration_error() {
    let provider = Arc::new(MockChatProvider::unconfigured());

    let response = post_json(
        mock_router(provider),
        "/comment",
        &json!({"examType": "Math", "currentScore": 90, "historyScores": [70, 80]}),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = response.json()["error"].as_str().unwrap().to_lowercase();
    assert!(error.contains("configur"));
}

#[tokio::test]
async fn missing_credential_is_reported_before_field_checks() {
    let provider = Arc::new(MockChatProvider::unconfigured());

    let response = post_json(mock_router(provider.clone()), "/comment", &json!({})).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = response.json()["error"].as_str().unwrap().to_lowercase();
    assert!(error.contains("configur"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn oversized_body_is_a_500_with_error_field() {
    let provider = Arc::new(MockChatProvider::replying("unused"));

    let response = send(
        mock_router(provider.clone()),
        Method::POST,
        "/comment",
        Body::from(vec![b' '; 3 * 1024 * 1024]),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = response.json()["error"].as_str().unwrap().to_string();
    assert!(error.contains("Bad input"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let provider = Arc::new(MockChatProvider::replying("ok"));

    let response = post_json(
        mock_router(provider),
        "/comment",
        &json!({"examType": "Math", "currentScore": 90, "historyScores": []}),
    )
    .await;

    assert!(!header(&response, "x-request-id").is_empty());
}
