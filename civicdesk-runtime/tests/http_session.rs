use std::sync::Arc;

use civicdesk_core::category::Category;
use civicdesk_core::completion::COMPLETION_SENTENCE;
use civicdesk_core::config::AppConfig;
use civicdesk_core::field::FieldName;
use civicdesk_core::phase::ConversationPhase;
use civicdesk_core::texts::APOLOGY_RETRY_OR_RESTART;
use civicdesk_core::types::{SessionToken, Turn};
use civicdesk_engine::machine::StepOutcome;
use civicdesk_engine::session::IntakeSession;
use civicdesk_engine::traits::RemoteChat;
use civicdesk_providers::runtime::ClientOptions;
use civicdesk_runtime::remote::HttpIntakeRemote;
use civicdesk_runtime::runtime_session::build_session_from_config;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": text }))
}

#[tokio::test]
async fn end_to_end_intake_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(serde_json::json!({"message": "road/traffic issues"})))
        .respond_with(reply("Please describe the issue."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(serde_json::json!({"message": "pothole on Elm street"})))
        .respond_with(reply("Where is it?"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(serde_json::json!({"message": "Elm & 3rd"})))
        .respond_with(reply("Your name?"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(serde_json::json!({"message": "Jane Citizen"})))
        .respond_with(reply(COMPLETION_SENTENCE))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = AppConfig {
        api_base_url: server.uri(),
        ..AppConfig::default()
    };
    let (session, _remote) = build_session_from_config(&cfg).unwrap();

    session.select_category(Category::Road).await;
    session
        .submit_field(FieldName::Description, "pothole on Elm street")
        .await;
    session.submit_field(FieldName::Location, "Elm & 3rd").await;
    let out = session
        .submit_field(FieldName::ContactName, "Jane Citizen")
        .await;
    assert_eq!(out, StepOutcome::Advanced(ConversationPhase::Completed));

    // Every request carried the same session id.
    let token = session.snapshot().await.session.token;
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    for req in &requests {
        let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(body["session_id"], token.as_str());
    }
}

#[tokio::test]
async fn server_error_becomes_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let remote = Arc::new(HttpIntakeRemote::new(server.uri(), ClientOptions::default()).unwrap());
    let session = IntakeSession::new(remote);

    let out = session.select_category(Category::Water).await;
    assert_eq!(
        out,
        StepOutcome::TransportFailed(ConversationPhase::CategorySelection)
    );
    let snap = session.snapshot().await;
    assert_eq!(
        snap.transcript.last(),
        Some(&Turn::assistant(APOLOGY_RETRY_OR_RESTART))
    );
}

#[tokio::test]
async fn malformed_reply_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let remote = HttpIntakeRemote::new(server.uri(), ClientOptions::default()).unwrap();
    let err = remote
        .send("hello", &SessionToken::new())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("decode chat reply JSON"));
}

#[tokio::test]
async fn reset_posts_and_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reset"))
        .respond_with(ResponseTemplate::new(200).set_body_string("whatever"))
        .expect(1)
        .mount(&server)
        .await;

    let remote = Arc::new(HttpIntakeRemote::new(server.uri(), ClientOptions::default()).unwrap());
    let session = IntakeSession::new(remote);
    session.reset().await.await.unwrap();
    assert_eq!(
        session.snapshot().await.phase,
        ConversationPhase::CategorySelection
    );
}

#[tokio::test]
async fn reset_survives_unreachable_service() {
    let remote = Arc::new(
        HttpIntakeRemote::new("http://127.0.0.1:1", ClientOptions::default()).unwrap(),
    );
    assert!(remote.reset().await.is_err());

    let session = IntakeSession::new(remote);
    let before = session.snapshot().await.session.token;
    session.reset().await.await.unwrap();
    let snap = session.snapshot().await;
    assert_ne!(snap.session.token, before);
    assert_eq!(snap.transcript.len(), 1);
}

#[tokio::test]
async fn health_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .mount(&server)
        .await;

    let remote = HttpIntakeRemote::new(server.uri(), ClientOptions::default()).unwrap();
    assert_eq!(remote.health().await.unwrap(), "ok");
}

#[test]
fn rejects_invalid_config() {
    let cfg = AppConfig {
        api_base_url: "".into(),
        ..AppConfig::default()
    };
    assert!(build_session_from_config(&cfg).is_err());
}
