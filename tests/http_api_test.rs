use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tarot_interpret::core::{InterpretationClient, RemoteCallOutcome};
use tarot_interpret::{server, InterpretationService, Spread};
use tower::ServiceExt;

struct UnreachableRemote {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl InterpretationClient for UnreachableRemote {
    async fn request_interpretation(&self, _spread: &Spread) -> RemoteCallOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RemoteCallOutcome::TransportFailure {
            status: None,
            detail: "connection refused".to_string(),
        }
    }
}

fn build_test_app() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = InterpretationService::new(UnreachableRemote {
        calls: Arc::clone(&calls),
    });
    (server::router(Arc::new(service)), calls)
}

async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

fn json_body(value: &serde_json::Value) -> Body {
    Body::from(serde_json::to_vec(value).unwrap())
}

#[tokio::test]
async fn test_post_with_failing_remote_returns_local_interpretation() {
    let (app, calls) = build_test_app();
    let body = json!({
        "past": {"name": "Le Fou", "keywords": "liberté,spontanéité"},
        "present": {"name": "La Roue de Fortune", "keywords": "changement,cycle"},
        "future": {"name": "Le Soleil", "keywords": "réussite,joie"},
        "question": ""
    });

    let (status, json) = send(app, "POST", "/api/interpret", json_body(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "local");
    let html = json["interpretation"].as_str().unwrap();
    assert!(html.contains("Le Fou"));
    assert!(html.contains("La Roue de Fortune"));
    assert!(html.contains("Le Soleil"));
    assert!(html.contains("<h3>Synthèse</h3>"));
    assert!(html.contains("general guidance"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_card_returns_400() {
    let (app, calls) = build_test_app();
    let body = json!({
        "past": {"name": "Le Fou", "keywords": "liberté"},
        "present": {"name": "La Lune", "keywords": "illusion"}
    });

    let (status, json) = send(app, "POST", "/api/interpret", json_body(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("future"));
    assert!(json.get("details").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_json_returns_400() {
    let (app, _) = build_test_app();

    let (status, json) = send(app, "POST", "/api/interpret", Body::from("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_non_post_returns_405() {
    for method in ["GET", "PUT", "DELETE"] {
        let (app, calls) = build_test_app();

        let (status, json) = send(app, method, "/api/interpret", Body::empty()).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_eq!(json["error"], "Method not allowed");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_health_returns_ok() {
    let (app, _) = build_test_app();

    let (status, json) = send(app, "GET", "/health", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
