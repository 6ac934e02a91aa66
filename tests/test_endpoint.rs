mod helpers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ed25519_dalek::SigningKey;
use helpers::{keypair, sign, MockDiscord, APPLICATION_ID};
use interactions_endpoint::builder::{
    CreateInteractionResponse,
    CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use interactions_endpoint::constants::{INITIAL_RESPONSE_TIMEOUT, INTERACTION_TOKEN_LIFETIME};
use interactions_endpoint::endpoint::{EndpointRequest, EndpointResponse, InteractionsEndpoint};
use interactions_endpoint::http::{Http, StatusCode};
use interactions_endpoint::model::channel::Message;
use interactions_endpoint::model::id::CommandId;
use interactions_endpoint::registry::{CommandHandler, CommandRegistry};
use interactions_endpoint::responder::{InteractionError, Responder};
use interactions_endpoint::{async_trait, Error, Result};
use serde_json::{json, Value};
use tokio::sync::mpsc;

const TIMESTAMP: &str = "1700000000";

struct Harness {
    endpoint: InteractionsEndpoint,
    registry: Arc<CommandRegistry>,
    key: SigningKey,
}

impl Harness {
    fn new(http: Http) -> Self {
        let (key, verifier) = keypair();
        let registry = Arc::new(CommandRegistry::new());
        let endpoint = InteractionsEndpoint::new(verifier, Arc::clone(&registry), Arc::new(http));

        Self {
            endpoint,
            registry,
            key,
        }
    }

    fn offline() -> Self {
        Self::new(Http::new("test-token"))
    }

    async fn post(&self, body: &Value) -> EndpointResponse {
        let body = body.to_string();
        let signature = sign(&self.key, TIMESTAMP, body.as_bytes());

        self.endpoint
            .handle(EndpointRequest {
                method: "POST",
                signature: Some(&signature),
                timestamp: Some(TIMESTAMP),
                body: body.as_bytes(),
            })
            .await
    }
}

fn command(id: u64, name: &str) -> Value {
    json!({
        "id": "10",
        "application_id": APPLICATION_ID.to_string(),
        "type": 2,
        "token": "interaction-token",
        "version": 1,
        "channel_id": "40",
        "user": {"id": "50", "username": "someone"},
        "data": {"id": id.to_string(), "name": name, "type": 1}
    })
}

fn message(content: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}

struct Reply {
    content: &'static str,
    calls: Arc<AtomicUsize>,
}

impl Reply {
    fn new(content: &'static str) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            content,
            calls: Arc::clone(&calls),
        });
        (handler, calls)
    }
}

#[async_trait]
impl CommandHandler for Reply {
    async fn handle(&self, responder: &mut Responder) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        responder.respond(message(self.content))
    }
}

struct Silent;

#[async_trait]
impl CommandHandler for Silent {
    async fn handle(&self, _: &mut Responder) -> Result<()> {
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl CommandHandler for Failing {
    async fn handle(&self, _: &mut Responder) -> Result<()> {
        Err(serde_json::from_str::<Value>("{").unwrap_err().into())
    }
}

struct Panicking;

#[async_trait]
impl CommandHandler for Panicking {
    async fn handle(&self, _: &mut Responder) -> Result<()> {
        panic!("handler blew up");
    }
}

#[tokio::test]
async fn non_post_is_not_found() {
    let harness = Harness::offline();

    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let response = harness
            .endpoint
            .handle(EndpointRequest {
                method,
                signature: None,
                timestamp: None,
                body: br#"{"type":1}"#,
            })
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            response.body,
            json!({"error": "Not Found", "message": "This endpoint only accepts POST method"})
        );
    }
}

#[tokio::test]
async fn bad_signature_is_prohibited() {
    let harness = Harness::offline();
    let body = br#"{"type":1}"#;
    let signature = sign(&harness.key, TIMESTAMP, body);
    let expected = json!({"error": "Prohibited", "message": "Invalid request signature"});

    let requests = [
        (None, Some(TIMESTAMP), &body[..]),
        (Some(signature.as_str()), None, &body[..]),
        (Some(signature.as_str()), Some("1700000001"), &body[..]),
        (Some(signature.as_str()), Some(TIMESTAMP), &br#"{"type":2}"#[..]),
        (Some(signature.as_str()), Some(TIMESTAMP), &b""[..]),
        (Some("not hex"), Some(TIMESTAMP), &body[..]),
    ];

    for (signature, timestamp, body) in requests {
        let response = harness
            .endpoint
            .handle(EndpointRequest {
                method: "POST",
                signature,
                timestamp,
                body,
            })
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, expected);
    }
}

#[tokio::test]
async fn signed_ping_is_ponged() {
    let harness = Harness::offline();
    let (handler, calls) = Reply::new("never");
    harness.registry.bind_name("ping", handler);

    let response = harness
        .post(&json!({"id": "1", "application_id": "20", "type": 1, "token": "t", "version": 1}))
        .await;

    assert_eq!(response, EndpointResponse::ok(json!({"type": 1})));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_type_is_bad_request() {
    let harness = Harness::offline();

    let response = harness.post(&json!({"id": "1", "type": 3, "token": "t"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({
            "error": "Bad Request",
            "message": "Invalid `InteractionType` specified in body property `type`: 3"
        })
    );

    let response = harness.post(&json!({"id": "1", "token": "t"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Bad Request");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let harness = Harness::offline();
    let body = b"definitely not json";
    let signature = sign(&harness.key, TIMESTAMP, body);

    let response = harness
        .endpoint
        .handle(EndpointRequest {
            method: "POST",
            signature: Some(&signature),
            timestamp: Some(TIMESTAMP),
            body,
        })
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // A command interaction missing its token.
    let response = harness.post(&json!({"id": "1", "application_id": "20", "type": 2})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Pings are parsed like every other interaction.
    let response = harness.post(&json!({"type": 1})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Bad Request");
}

#[tokio::test]
async fn name_binding_wins_over_id_binding() {
    let harness = Harness::offline();
    let (by_id, id_calls) = Reply::new("by id");
    let (by_name, name_calls) = Reply::new("by name");
    harness.registry.bind_id(CommandId::new(30), by_id);
    harness.registry.bind_name("echo", by_name);

    let response = harness.post(&command(30, "echo")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"type": 4, "data": {"content": "by name"}}));
    assert_eq!(name_calls.load(Ordering::SeqCst), 1);
    assert_eq!(id_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn id_binding_is_used_without_name_binding() {
    let harness = Harness::offline();
    let (by_id, id_calls) = Reply::new("by id");
    harness.registry.bind_id(CommandId::new(30), by_id);

    let response = harness.post(&command(30, "renamed")).await;

    assert_eq!(response.body, json!({"type": 4, "data": {"content": "by id"}}));
    assert_eq!(id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unmatched_commands_are_acknowledged() {
    let harness = Harness::offline();

    let response = harness.post(&command(99, "unknown")).await;
    assert_eq!(response, EndpointResponse::ok(json!({"type": 1})));

    let mut without_data = command(99, "unknown");
    without_data.as_object_mut().unwrap().remove("data");
    let response = harness.post(&without_data).await;
    assert_eq!(response, EndpointResponse::ok(json!({"type": 1})));
}

#[tokio::test]
async fn handlers_that_do_not_respond_are_acknowledged() {
    let harness = Harness::offline();
    harness.registry.bind_name("silent", Arc::new(Silent));
    harness.registry.bind_name("failing", Arc::new(Failing));

    let response = harness.post(&command(1, "silent")).await;
    assert_eq!(response, EndpointResponse::ok(json!({"type": 1})));

    let response = harness.post(&command(2, "failing")).await;
    assert_eq!(response, EndpointResponse::ok(json!({"type": 1})));
}

#[tokio::test]
async fn panicking_handler_is_an_internal_error() {
    let harness = Harness::offline();
    harness.registry.bind_name("boom", Arc::new(Panicking));

    let response = harness.post(&command(1, "boom")).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({"error": "Internal Server Error", "message": "Interaction was not acknowledged"})
    );
}

struct RespondTwice {
    results: mpsc::UnboundedSender<Result<()>>,
}

#[async_trait]
impl CommandHandler for RespondTwice {
    async fn handle(&self, responder: &mut Responder) -> Result<()> {
        let first = responder.respond(message("first"));
        let second = responder.respond(message("second"));
        let ack = responder.acknowledge();

        for result in [first, second, ack] {
            self.results.send(result).unwrap();
        }
        Ok(())
    }
}

#[tokio::test]
async fn second_response_is_rejected() {
    let harness = Harness::offline();
    let (results, mut receiver) = mpsc::unbounded_channel();
    harness.registry.bind_name("twice", Arc::new(RespondTwice {
        results,
    }));

    let response = harness.post(&command(1, "twice")).await;
    assert_eq!(response.body, json!({"type": 4, "data": {"content": "first"}}));

    assert!(receiver.recv().await.unwrap().is_ok());
    for _ in 0..2 {
        assert!(matches!(
            receiver.recv().await.unwrap(),
            Err(Error::Interaction(InteractionError::AlreadyResponded))
        ));
    }
}

struct Late {
    results: mpsc::UnboundedSender<Result<()>>,
}

#[async_trait]
impl CommandHandler for Late {
    async fn handle(&self, responder: &mut Responder) -> Result<()> {
        tokio::time::sleep(INTERACTION_TOKEN_LIFETIME).await;
        self.results.send(responder.respond(message("too late"))).unwrap();
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn response_after_token_lifetime_is_rejected() {
    let harness = Harness::offline();
    let (results, mut receiver) = mpsc::unbounded_channel();
    harness.registry.bind_name("late", Arc::new(Late {
        results,
    }));

    let response = harness.post(&command(1, "late")).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(
        receiver.recv().await.unwrap(),
        Err(Error::Interaction(InteractionError::TokenExpired))
    ));
}

struct Slow {
    results: mpsc::UnboundedSender<Result<()>>,
}

#[async_trait]
impl CommandHandler for Slow {
    async fn handle(&self, responder: &mut Responder) -> Result<()> {
        tokio::time::sleep(INITIAL_RESPONSE_TIMEOUT + Duration::from_secs(2)).await;
        self.results.send(responder.respond(message("slow"))).unwrap();
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn slow_handler_is_not_acknowledged() {
    let harness = Harness::offline();
    let (results, mut receiver) = mpsc::unbounded_channel();
    harness.registry.bind_name("slow", Arc::new(Slow {
        results,
    }));

    let response = harness.post(&command(1, "slow")).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({"error": "Internal Server Error", "message": "Interaction was not acknowledged"})
    );
    // The handler still runs to completion, its response just has nowhere to go.
    assert!(receiver.recv().await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn response_timeout_is_configurable() {
    let mut harness = Harness::offline();
    harness.endpoint = harness.endpoint.response_timeout(Duration::from_secs(10));
    let (results, mut receiver) = mpsc::unbounded_channel();
    harness.registry.bind_name("slow", Arc::new(Slow {
        results,
    }));

    let response = harness.post(&command(1, "slow")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"type": 4, "data": {"content": "slow"}}));
    assert!(receiver.recv().await.unwrap().is_ok());
}

struct DeferThenEdit {
    results: mpsc::UnboundedSender<Result<(Message, Message)>>,
}

impl DeferThenEdit {
    async fn work(responder: &Responder) -> Result<(Message, Message)> {
        let edit = EditInteractionResponse::new().content("done");
        let edited = responder.edit_initial_response(&edit).await?;

        let followup = CreateInteractionResponseFollowup::new().content("and another thing");
        let followup = responder.follow_up(&followup).await?;

        let edit = EditInteractionResponse::new().content("changed my mind");
        responder.edit_response(&edit, followup.id.into()).await?;
        responder.delete_response(followup.id.into()).await?;
        responder.delete_initial_response().await?;

        Ok((edited, followup))
    }
}

#[async_trait]
impl CommandHandler for DeferThenEdit {
    async fn handle(&self, responder: &mut Responder) -> Result<()> {
        responder.defer()?;
        self.results.send(Self::work(responder).await).unwrap();
        Ok(())
    }
}

#[tokio::test]
async fn deferred_response_is_edited_through_the_webhook() {
    let mock = MockDiscord::spawn().await;
    let harness = Harness::new(mock.http());
    let (results, mut receiver) = mpsc::unbounded_channel();
    harness.registry.bind_name("slow", Arc::new(DeferThenEdit {
        results,
    }));

    let response = harness.post(&command(1, "slow")).await;
    assert_eq!(response, EndpointResponse::ok(json!({"type": 5, "data": {}})));

    let (edited, followup) = receiver.recv().await.unwrap().unwrap();
    assert_eq!(edited.content, "done");
    assert_eq!(followup.content, "and another thing");

    let requests: Vec<_> =
        mock.requests().into_iter().map(|r| (r.method, r.path, r.body)).collect();
    assert_eq!(requests, vec![
        (
            "PATCH".to_string(),
            "/api/v10/webhooks/20/interaction-token/messages/@original".to_string(),
            Some(json!({"content": "done"})),
        ),
        (
            "POST".to_string(),
            "/api/v10/webhooks/20/interaction-token".to_string(),
            Some(json!({"content": "and another thing"})),
        ),
        (
            "PATCH".to_string(),
            "/api/v10/webhooks/20/interaction-token/messages/2001".to_string(),
            Some(json!({"content": "changed my mind"})),
        ),
        ("DELETE".to_string(), "/api/v10/webhooks/20/interaction-token/messages/2001".to_string(), None),
        (
            "DELETE".to_string(),
            "/api/v10/webhooks/20/interaction-token/messages/@original".to_string(),
            None
        ),
    ]);
}
