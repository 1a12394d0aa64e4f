#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// One request as seen by the fake upstream
#[derive(Debug, Clone)]
pub struct Recorded {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    reply: Value,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

/// GraphQL endpoint double served on `127.0.0.1:<ephemeral>/graphql`.
///
/// Answers every POST with the same status and JSON body.
pub struct Upstream {
    addr: SocketAddr,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl Upstream {
    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            status,
            reply,
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/graphql", post(handle))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake upstream serves");
        });

        Self { addr, recorded }
    }

    pub async fn ok(reply: Value) -> Self {
        Self::spawn(StatusCode::OK, reply).await
    }

    /// Storefront root, i.e. without the `/graphql` suffix
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.recorded.lock().unwrap().push(Recorded { headers, body });
    (state.status, Json(state.reply.clone()))
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/graphql")
}
