#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use hitsong_quiz_backend::{
    config::QuizConfig, dify::Dify, routes::build_router, state::AppState,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "app-test-key";

/// One request as seen by the fake workflow endpoint.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Stand-in for the Dify API, listening on an ephemeral local port.
pub struct FakeDify {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeDify {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

pub async fn spawn_fake_dify(status: u16, body: impl Into<String>) -> FakeDify {
    spawn_fake_dify_with_delay(status, body, Duration::ZERO).await
}

pub async fn spawn_fake_dify_with_delay(
    status: u16,
    body: impl Into<String>,
    delay: Duration,
) -> FakeDify {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.into(),
        delay,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/v1/workflows/run", post(fake_workflow_run))
        .with_state(state);
    let addr = serve(app).await;
    FakeDify {
        base_url: format!("http://{}/v1", addr),
        requests,
    }
}

async fn fake_workflow_run(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .unwrap()
        .push(Recorded { authorization, body });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// Serve `app` on 127.0.0.1 with an OS-assigned port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A local address nothing is listening on.
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1", addr)
}

pub fn create_test_app(base_url: &str, timeout: Duration) -> Router {
    let dify = Dify::new(TEST_API_KEY, base_url, timeout).unwrap();
    build_router(Arc::new(AppState::with_parts(
        Some(dify),
        QuizConfig::default(),
    )))
}

pub async fn post_quiz(app: &Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/quiz")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "non-JSON response {} body {}",
            status,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, json)
}
