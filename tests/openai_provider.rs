use serde_json::json;
use std::sync::Arc;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reqcollector::config::OpenAiConfig;
use reqcollector::error::ReqCollectorError;
use reqcollector::providers::{Message, OpenAiProvider, Provider};
use reqcollector::session::{Session, FAILURE_PLACEHOLDER};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    let cfg = OpenAiConfig {
        model: "gpt-4".to_string(),
        api_base: format!("{}/v1", server.uri()),
        api_key: Some("sk-test".to_string()),
        timeout_seconds: 5,
    };
    OpenAiProvider::new(cfg).unwrap()
}

#[tokio::test]
async fn test_openai_completion_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "messages": [{ "role": "user", "content": "Hello" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "What is the project called?" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider.complete(&[Message::user("Hello")]).await.unwrap();

    assert_eq!(response.message, Message::assistant("What is the project called?"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 12);
    assert_eq!(usage.completion_tokens, 7);
}

#[tokio::test]
async fn test_openai_unauthorized_becomes_placeholder_in_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::new(Arc::new(provider_for(&server)));
    let reply = session.submit_user_reply("We need an app").await.to_string();

    assert_eq!(reply, FAILURE_PLACEHOLDER);
    assert_eq!(session.transcript().len(), 4);
}

#[tokio::test]
async fn test_openai_direct_error_mentions_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[Message::user("x")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_openai_empty_choices_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = provider_for(&server).complete(&[Message::user("x")]).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("no choices"));
}

#[tokio::test]
async fn test_openai_null_content_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })))
        .mount(&server)
        .await;

    let result = provider_for(&server).complete(&[Message::user("x")]).await;
    assert!(result.unwrap_err().to_string().contains("no content"));
}

#[tokio::test]
async fn test_openai_malformed_body_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = provider_for(&server).complete(&[Message::user("x")]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_openai_huge_usage_counts_do_not_break_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Which platform?" } }],
            "usage": { "prompt_tokens": u64::MAX, "completion_tokens": 1 }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = Session::new(Arc::new(provider_for(&server)));
    session.submit_user_reply("x").await;
    let reply = session.submit_user_reply("y").await.to_string();

    assert_eq!(reply, "Which platform?");
    assert_eq!(session.transcript().len(), 7);
    assert_eq!(session.usage().total_tokens, usize::MAX);
}

#[tokio::test]
async fn test_openai_connection_failure_is_http_error() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);
    drop(server);

    let err = provider.complete(&[Message::user("x")]).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReqCollectorError>(),
        Some(ReqCollectorError::Http(_))
    ));
}
