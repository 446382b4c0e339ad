//! Local HTTP service used by the end-to-end tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub score: f64,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
    #[serde(default)]
    score: f64,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

type Shared = Arc<Mutex<Store>>;

/// A users service bound to an ephemeral port on 127.0.0.1.
///
/// Declare it before any actor talking to it so the actor drops first.
pub struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn start() -> Self {
        let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind test server");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("local addr");

        let app = router(Arc::new(Mutex::new(Store {
            next_id: 1,
            users: BTreeMap::new(),
        })));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("test server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                });
                let _ = server.await;
            });
        });

        Self {
            base_url: format!("http://{addr}"),
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// A port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route("/echo", get(echo_headers).post(echo_headers))
        .route("/users", post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(replace_user).patch(patch_user).delete(delete_user),
        )
        .with_state(store)
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(json!({"headers": headers}))
}

async fn create_user(State(store): State<Shared>, Json(input): Json<NewUser>) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock");
    let user = User {
        id: store.next_id,
        name: input.name,
        score: input.score,
        active: true,
    };
    store.next_id += 1;
    store.users.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(json!({"user": user})))
}

async fn get_user(State(store): State<Shared>, Path(id): Path<i64>) -> impl IntoResponse {
    let store = store.lock().expect("store lock");
    match store.users.get(&id) {
        Some(user) => (StatusCode::OK, Json(json!({"user": user}))),
        None => not_found(id),
    }
}

async fn replace_user(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(input): Json<NewUser>,
) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock");
    match store.users.get_mut(&id) {
        Some(user) => {
            user.name = input.name;
            user.score = input.score;
            (StatusCode::OK, Json(json!({"user": user})))
        }
        None => not_found(id),
    }
}

async fn patch_user(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock");
    match store.users.get_mut(&id) {
        Some(user) => {
            if let Some(active) = patch.get("active").and_then(Value::as_bool) {
                user.active = active;
            }
            (StatusCode::OK, Json(json!({"user": user})))
        }
        None => not_found(id),
    }
}

async fn delete_user(State(store): State<Shared>, Path(id): Path<i64>) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock");
    match store.users.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(id).into_response(),
    }
}

fn not_found(id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("user {id} not found")})),
    )
}
