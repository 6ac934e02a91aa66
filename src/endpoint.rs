//! The HTTP-facing entry point of the interactions endpoint.
//!
//! [`InteractionsEndpoint::handle`] takes the parts of an incoming HTTP request and produces the
//! status code and JSON body to answer with. It is independent of any HTTP server; see
//! `demos/axum_endpoint.rs` for a wiring with axum.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Error as JsonError;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, instrument, warn, Instrument as _};

use crate::builder::CreateInteractionResponse;
use crate::constants::INITIAL_RESPONSE_TIMEOUT;
use crate::http::{Http, StatusCode};
use crate::internal::prelude::*;
use crate::model::application::{peek_kind, CommandInteraction, Interaction, InteractionType};
use crate::registry::CommandRegistry;
use crate::responder::Responder;
use crate::verifier::Verifier;

/// The parts of an incoming HTTP request the endpoint looks at.
#[derive(Clone, Copy, Debug)]
pub struct EndpointRequest<'a> {
    /// The HTTP method, e.g. `"POST"`.
    pub method: &'a str,
    /// The value of the `X-Signature-Ed25519` header.
    pub signature: Option<&'a str>,
    /// The value of the `X-Signature-Timestamp` header.
    pub timestamp: Option<&'a str>,
    /// The raw request body, exactly as received.
    pub body: &'a [u8],
}

/// The status code and JSON body to answer an [`EndpointRequest`] with.
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl EndpointResponse {
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn pong() -> Self {
        Self::ok(json!({ "type": u8::from(CreateInteractionResponse::Pong.kind()) }))
    }

    /// The body serialized as JSON.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.body.to_string().into_bytes()
    }
}

/// The reasons a request is answered with an error status.
#[derive(Debug)]
#[non_exhaustive]
pub enum EndpointError {
    /// The request did not use the POST method.
    MethodNotAllowed,
    /// The signature headers are missing, or do not match the body.
    InvalidSignature,
    /// The `type` of the interaction is not one the endpoint handles. Holds the received value.
    UnknownInteractionType(Value),
    /// The body is not a valid interaction payload.
    MalformedBody(JsonError),
    /// No response reached the endpoint: the handler panicked, the interaction token had already
    /// expired, or the handler did not respond within the endpoint's response timeout.
    NotAcknowledged,
}

impl EndpointError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::NOT_FOUND,
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::UnknownInteractionType(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::NotAcknowledged => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Not Found",
            Self::InvalidSignature => "Prohibited",
            Self::UnknownInteractionType(_) | Self::MalformedBody(_) => "Bad Request",
            Self::NotAcknowledged => "Internal Server Error",
        }
    }

    /// The JSON error response, `{"error": ..., "message": ...}`.
    #[must_use]
    pub fn into_response(self) -> EndpointResponse {
        EndpointResponse {
            status: self.status(),
            body: json!({
                "error": self.error(),
                "message": self.to_string(),
            }),
        }
    }
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodNotAllowed => f.write_str("This endpoint only accepts POST method"),
            Self::InvalidSignature => f.write_str("Invalid request signature"),
            Self::UnknownInteractionType(kind) => {
                write!(f, "Invalid `InteractionType` specified in body property `type`: {kind}")
            },
            Self::MalformedBody(inner) => write!(f, "Invalid interaction payload: {inner}"),
            Self::NotAcknowledged => f.write_str("Interaction was not acknowledged"),
        }
    }
}

impl StdError for EndpointError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::MalformedBody(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Verifies and dispatches interactions received over HTTP.
///
/// Pings are answered directly. Application commands are routed through the
/// [`CommandRegistry`] to a [`CommandHandler`], which runs on its own task and answers through
/// a [`Responder`]; the first response it sends becomes the HTTP response. Commands without a
/// matching handler are acknowledged right away.
///
/// The endpoint waits at most [`Self::response_timeout`] for a handler's first response, and
/// answers [`EndpointError::NotAcknowledged`] after that. The handler task keeps running, but
/// whatever it responds later is dropped.
///
/// [`CommandHandler`]: crate::registry::CommandHandler
#[derive(Clone, Debug)]
pub struct InteractionsEndpoint {
    verifier: Verifier,
    registry: Arc<CommandRegistry>,
    http: Arc<Http>,
    response_timeout: Duration,
}

impl InteractionsEndpoint {
    #[must_use]
    pub fn new(verifier: Verifier, registry: Arc<CommandRegistry>, http: Arc<Http>) -> Self {
        Self {
            verifier,
            registry,
            http,
            response_timeout: INITIAL_RESPONSE_TIMEOUT,
        }
    }

    /// Sets how long to wait for a handler's first response.
    ///
    /// Defaults to [`INITIAL_RESPONSE_TIMEOUT`], after which Discord fails the interaction
    /// anyway.
    #[must_use]
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }

    /// Handles a request made to the interactions endpoint.
    #[instrument(skip_all, fields(method = request.method))]
    pub async fn handle(&self, request: EndpointRequest<'_>) -> EndpointResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(why) => {
                debug!("rejecting request: {why}");
                why.into_response()
            },
        }
    }

    async fn dispatch(
        &self,
        request: EndpointRequest<'_>,
    ) -> StdResult<EndpointResponse, EndpointError> {
        if !request.method.eq_ignore_ascii_case("POST") {
            return Err(EndpointError::MethodNotAllowed);
        }

        let body = Some(request.body).filter(|body| !body.is_empty());
        if !self.verifier.is_authentic(request.signature, request.timestamp, body) {
            return Err(EndpointError::InvalidSignature);
        }

        let value: Value =
            serde_json::from_slice(request.body).map_err(EndpointError::MalformedBody)?;

        if let Some(InteractionType::Unknown(_)) | None = peek_kind(&value) {
            let kind = value.get("type").cloned().unwrap_or(Value::Null);
            return Err(EndpointError::UnknownInteractionType(kind));
        }

        let interaction: Interaction =
            serde_json::from_value(value).map_err(EndpointError::MalformedBody)?;
        debug!(id = %interaction.id(), kind = ?interaction.kind(), "received interaction");

        match interaction {
            Interaction::Ping(_) => Ok(EndpointResponse::pong()),
            Interaction::Command(interaction) => self.dispatch_command(interaction).await,
        }
    }

    #[instrument(skip_all, fields(id = %interaction.id))]
    async fn dispatch_command(
        &self,
        interaction: CommandInteraction,
    ) -> StdResult<EndpointResponse, EndpointError> {
        let received_at = Instant::now();
        let (sender, receiver) = oneshot::channel();

        let handler = interaction.data.as_ref().and_then(|data| self.registry.handler_for(data));
        let mut responder = Responder::new(interaction, Arc::clone(&self.http), received_at, sender);

        if let Some(handler) = handler {
            let task = async move {
                if let Err(why) = handler.handle(&mut responder).await {
                    warn!("command handler returned an error: {why:?}");
                }

                if let Err(why) = responder.ensure_acknowledged() {
                    warn!("could not acknowledge interaction: {why:?}");
                }
            };
            tokio::spawn(task.in_current_span());
        } else {
            debug!("no handler bound, acknowledging");
            if let Err(why) = responder.acknowledge() {
                warn!("could not acknowledge interaction: {why:?}");
            }
        }

        match tokio::time::timeout(self.response_timeout, receiver).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(EndpointError::NotAcknowledged),
            Err(_) => {
                warn!(timeout = ?self.response_timeout, "handler did not respond in time");
                Err(EndpointError::NotAcknowledged)
            },
        }
    }
}
