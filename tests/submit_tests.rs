mod common;

use common::ScriptedTransport;
use modelscope_rs::submit::{submit_task, ASYNC_MODE_HEADER};
use modelscope_rs::{ErrorCode, HttpMethod, HttpResponse, SubmitBody};

fn body() -> SubmitBody {
    SubmitBody {
        prompt: "a fox".into(),
        model: "m".into(),
        size: "512x512".into(),
        seed: 5,
        steps: 9,
        negative_prompt: None,
        guidance: None,
        loras: None,
    }
}

#[tokio::test]
async fn test_submit_sends_expected_request() {
    let transport = ScriptedTransport::new(vec![HttpResponse::new(200, r#"{"task_id": "t-1"}"#)]);
    let handle = submit_task(&transport, "http://api", "secret-token", &body())
        .await
        .unwrap();
    assert_eq!(handle.as_str(), "t-1");

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].url, "http://api/images/generations");
    assert_eq!(sent[0].header_value("Authorization"), Some("Bearer secret-token"));
    assert_eq!(sent[0].header_value("Content-Type"), Some("application/json"));
    assert_eq!(sent[0].header_value(ASYNC_MODE_HEADER), Some("true"));
    assert_eq!(transport.submit_body()["seed"], 5);
}

#[tokio::test]
async fn test_missing_or_unusable_task_id() {
    for body_text in [
        r#"{}"#,
        r#"{"task_id": ""}"#,
        r#"{"task_id": null}"#,
        r#"{"task_id": 12345}"#,
        r#"{"task_id": ["t-1"]}"#,
        r#"["t-1"]"#,
    ] {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(200, body_text)]);
        let err = submit_task(&transport, "http://api", "secret-token", &body())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::GenerationFailed, "body: {}", body_text);
        assert_eq!(err.message(), Some("No task_id returned"));
    }
}

#[tokio::test]
async fn test_non_json_success_body() {
    let transport = ScriptedTransport::new(vec![HttpResponse::new(200, "<html>ok</html>")]);
    let err = submit_task(&transport, "http://api", "secret-token", &body())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidResponse);
}

#[tokio::test]
async fn test_error_status_is_classified() {
    let transport = ScriptedTransport::new(vec![HttpResponse::new(401, "not json")]);
    let err = submit_task(&transport, "http://api", "secret-token", &body())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AuthInvalid);
    assert_eq!(err.message(), Some("HTTP 401"));
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let transport = ScriptedTransport::new(vec![]);
    let err = submit_task(&transport, "http://api", "secret-token", &body())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Network);
}
