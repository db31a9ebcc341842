use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;

use super::{HEALTH_RESPONSE, STATE_RESPONSE};

/// In-process stand-in for zero's HTTP endpoint.
pub(crate) struct TestServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    pub(crate) async fn spawn(router: Router) -> Self {
        Self::spawn_counted(router, Arc::new(AtomicUsize::new(0))).await
    }

    /// `hits` is whatever counter the router's handlers bump.
    pub(crate) async fn spawn_counted(router: Router, hits: Arc<AtomicUsize>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self { addr, hits }
    }

    /// A healthy single-node zero.
    pub(crate) async fn healthy() -> Self {
        Self::spawn(zero_router(StatusCode::OK, state_body(true))).await
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub(crate) fn state_body(leader: bool) -> String {
    if leader {
        format!(r#"{{"counter":"7","groups":{{"1":{{"members":{{"1":{{{STATE_RESPONSE},"lastUpdate":"0"}}}}}}}}}}"#)
    } else {
        r#"{"counter":"7","groups":{"1":{"members":{"1":{"id":"1","groupId":0,"addr":"localhost:5080","leader":false,"amDead":false}}}}}"#
            .to_string()
    }
}

pub(crate) fn zero_router(health_status: StatusCode, state: String) -> Router {
    Router::new()
        .route("/health", get(move || async move { (health_status, HEALTH_RESPONSE) }))
        .route(
            "/state",
            get(move || {
                let state = state.clone();
                async move { state }
            }),
        )
}

/// Like [`zero_router`] but counts every request it serves.
pub(crate) fn counting_router(health_status: StatusCode, hits: Arc<AtomicUsize>) -> Router {
    let state_hits = hits.clone();
    Router::new()
        .route(
            "/health",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (health_status, HEALTH_RESPONSE)
                }
            }),
        )
        .route(
            "/state",
            get(move || {
                let hits = state_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    state_body(true)
                }
            }),
        )
}
