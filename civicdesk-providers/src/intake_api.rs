//! Request builders for the complaint-intake service.
//!
//! `POST /chat`   `{ message, session_id }` -> `{ reply }`
//! `POST /reset`  no body; response ignored
//! `GET  /health` `{ status }`

use crate::request::{Body, HttpRequest};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeApiConfig {
    pub base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    message: &'a str,
    session_id: &'a str,
}

pub fn build_chat_request(cfg: &IntakeApiConfig, message: &str, session_id: &str) -> HttpRequest {
    let payload = ChatRequestBody {
        message,
        session_id,
    };

    HttpRequest {
        method: "POST".into(),
        url: join_url(&cfg.base_url, "/chat"),
        headers: vec![("Content-Type".into(), "application/json".into())],
        // Serializing two borrowed strings cannot fail.
        body: Body::Json(serde_json::to_string(&payload).unwrap_or_default()),
    }
}

pub fn build_reset_request(cfg: &IntakeApiConfig) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url: join_url(&cfg.base_url, "/reset"),
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: Body::Empty,
    }
}

pub fn build_health_request(cfg: &IntakeApiConfig) -> HttpRequest {
    HttpRequest {
        method: "GET".into(),
        url: join_url(&cfg.base_url, "/health"),
        headers: vec![],
        body: Body::Empty,
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> IntakeApiConfig {
        IntakeApiConfig {
            base_url: "http://localhost:8000/".into(),
        }
    }

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:8000/", "/chat"),
            "http://localhost:8000/chat"
        );
        assert_eq!(
            join_url("http://localhost:8000", "reset"),
            "http://localhost:8000/reset"
        );
    }

    #[test]
    fn chat_request_carries_message_and_session() {
        let req = build_chat_request(&cfg(), "road/traffic issues", "session_1_abc");

        assert_eq!(req.method, "POST");
        assert_eq!(req.url, "http://localhost:8000/chat");
        assert_eq!(req.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(req.json_body().unwrap()).unwrap();
        assert_eq!(body["message"], "road/traffic issues");
        assert_eq!(body["session_id"], "session_1_abc");
    }

    #[test]
    fn chat_request_escapes_quotes() {
        let req = build_chat_request(&cfg(), "the \"big\" pothole", "s");
        let body: serde_json::Value = serde_json::from_str(req.json_body().unwrap()).unwrap();
        assert_eq!(body["message"], "the \"big\" pothole");
    }

    #[test]
    fn reset_request_has_no_body() {
        let req = build_reset_request(&cfg());
        assert_eq!(req.method, "POST");
        assert!(req.url.ends_with("/reset"));
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn health_request_is_get() {
        let req = build_health_request(&cfg());
        assert_eq!(req.method, "GET");
        assert!(req.url.ends_with("/health"));
    }
}
