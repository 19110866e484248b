//! Scripted stand-in for the SSL Labs analyze endpoint.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::RwLock;

use ssl_checker::poller::Delay;

pub const ANALYZE_PATH: &str = "/api/v2/analyze";

#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<RwLock<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    script: VecDeque<(StatusCode, String)>,
    requests: Vec<HashMap<String, String>>,
}

impl MockState {
    /// Queries received so far, in order.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.inner.read().await.requests.clone()
    }
}

/// Serve `script` one response per request. Once exhausted, answers 500.
pub async fn spawn_mock(script: Vec<(StatusCode, String)>) -> (String, MockState) {
    let state = MockState::default();
    state.inner.write().await.script = script.into();

    let app = Router::new()
        .route(ANALYZE_PATH, get(analyze))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    (format!("http://{addr}{ANALYZE_PATH}"), state)
}

async fn analyze(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mut s = state.inner.write().await;
    s.requests.push(params);
    let (code, body) = s
        .script
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, String::from("script exhausted")));
    (code, [("content-type", "application/json")], body)
}

/// An address nothing is listening on.
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr: SocketAddr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}{ANALYZE_PATH}")
}

/// Accept up to `connections` connections, each answered with a 200 whose
/// body is shorter than its `Content-Length`, then closed.
pub async fn spawn_truncated_body(connections: usize) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncated");
    let addr = listener.local_addr().expect("truncated addr");
    tokio::spawn(async move {
        for _ in 0..connections {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"host\"")
                .await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}{ANALYZE_PATH}")
}

pub fn ok(body: &str) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

pub fn status_body(status: &str) -> String {
    format!(r#"{{"host":"example.com","status":"{status}","endpoints":[]}}"#)
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub calls: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Delay for RecordingDelay {
    fn sleep(&self, period: Duration) -> impl std::future::Future<Output = ()> {
        self.calls.lock().unwrap().push(period);
        std::future::ready(())
    }
}
