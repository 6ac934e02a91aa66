#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use ed25519_dalek::{Signer, SigningKey};
use interactions_endpoint::http::{Http, HttpBuilder};
use interactions_endpoint::model::id::ApplicationId;
use interactions_endpoint::verifier::Verifier;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const TOKEN: &str = "test-token";
pub const APPLICATION_ID: u64 = 20;
/// Requests for this application are answered only after a long delay.
pub const SLOW_APPLICATION_ID: u64 = 99;

/// A request received by the mock API.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// An in-process stand-in for the parts of Discord's REST API the crate calls.
pub struct MockDiscord {
    pub addr: SocketAddr,
    pub api_base: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    _handle: JoinHandle<()>,
}

impl MockDiscord {
    pub async fn spawn() -> Self {
        let state = MockState::default();
        let requests = Arc::clone(&state.requests);

        let router = Router::new()
            .route("/api/v10/applications/{app}/commands", get(list_commands).post(create_command))
            .route(
                "/api/v10/applications/{app}/commands/{id}",
                patch(edit_command).delete(delete_command),
            )
            .route("/api/v10/webhooks/{app}/{token}", post(create_followup))
            .route(
                "/api/v10/webhooks/{app}/{token}/messages/{message}",
                patch(edit_message).delete(delete_message),
            )
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Mock server failed");
        });

        Self {
            addr,
            api_base: format!("http://{addr}/api/v10"),
            requests,
            _handle: handle,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn http(&self) -> Http {
        HttpBuilder::new(TOKEN)
            .application_id(ApplicationId::new(APPLICATION_ID))
            .api_base(&self.api_base)
            .build()
    }
}

async fn record(State(state): State<MockState>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();

    let authorization =
        parts.headers.get("authorization").map(|v| v.to_str().unwrap().to_string());
    let authorized = authorization.as_deref() == Some("Bot test-token");
    state.requests.lock().unwrap().push(Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization,
        body: serde_json::from_slice(&bytes).ok(),
    });

    if !authorized {
        let body = json!({"message": "401: Unauthorized", "code": 0});
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub fn command_json(id: u64, name: &Value, description: &Value) -> Value {
    json!({
        "id": id.to_string(),
        "application_id": APPLICATION_ID.to_string(),
        "type": 1,
        "name": name,
        "description": description,
        "version": "1",
    })
}

fn message_json(id: u64, content: &Value) -> Value {
    json!({
        "id": id.to_string(),
        "channel_id": "40",
        "content": content,
        "embeds": [],
        "tts": false,
        "timestamp": "2024-05-01T12:00:00.000000+00:00",
    })
}

async fn list_commands(Path(app): Path<u64>) -> Json<Value> {
    if app == SLOW_APPLICATION_ID {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    Json(json!([
        command_json(1001, &json!("ping"), &json!("Replies with pong")),
        command_json(1002, &json!("echo"), &json!("Echoes a message")),
    ]))
}

async fn create_command(Path(_app): Path<u64>, Json(body): Json<Value>) -> impl IntoResponse {
    (StatusCode::CREATED, Json(command_json(1003, &body["name"], &body["description"])))
}

async fn edit_command(Path((_app, id)): Path<(u64, u64)>, Json(body): Json<Value>) -> Json<Value> {
    Json(command_json(id, &body["name"], &body["description"]))
}

async fn delete_command(Path((_app, id)): Path<(u64, u64)>) -> Response {
    if id == 404 {
        let body = json!({"message": "Unknown application command", "code": 10063});
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn create_followup(
    Path((_app, _token)): Path<(u64, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    Json(message_json(2001, &body["content"]))
}

async fn edit_message(
    Path((_app, _token, message)): Path<(u64, String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = if message == "@original" { 2000 } else { message.parse().unwrap() };
    let mut message = message_json(id, &body["content"]);
    message["edited_timestamp"] = json!("2024-05-01T12:05:00.000000+00:00");
    Json(message)
}

async fn delete_message(Path((_app, _token, _message)): Path<(u64, String, String)>) -> StatusCode {
    StatusCode::NO_CONTENT
}

/// A deterministic application key pair.
pub fn keypair() -> (SigningKey, Verifier) {
    let signing_key = SigningKey::from_bytes(&[42; 32]);
    let verifier = Verifier::try_new(signing_key.verifying_key().to_bytes()).unwrap();
    (signing_key, verifier)
}

pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Signs `timestamp || body` the way Discord does, returning the hex encoded signature.
pub fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
    hex(&key.sign(&[timestamp.as_bytes(), body].concat()).to_bytes())
}
