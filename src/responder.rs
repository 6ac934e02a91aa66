//! The response lifecycle of a single application command interaction.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{instrument, warn};

use crate::builder::{
    CreateInteractionResponse,
    CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use crate::constants::INTERACTION_TOKEN_LIFETIME;
use crate::endpoint::EndpointResponse;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::application::{CommandData, CommandInteraction};
use crate::model::channel::Message;
use crate::model::id::MessageId;

/// An error returned when a [`Responder`] is used against the interaction response rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum InteractionError {
    /// The interaction token is no longer valid, as more than
    /// [`INTERACTION_TOKEN_LIFETIME`] passed since the interaction was received.
    ///
    /// [`INTERACTION_TOKEN_LIFETIME`]: crate::constants::INTERACTION_TOKEN_LIFETIME
    TokenExpired,
    /// The interaction was already responded to. Use [`Responder::edit_initial_response`] or
    /// [`Responder::follow_up`] to send more.
    AlreadyResponded,
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired => f.write_str("The interaction token has expired"),
            Self::AlreadyResponded => f.write_str("The interaction has already been responded to"),
        }
    }
}

impl StdError for InteractionError {}

/// Addresses a message sent through an interaction's webhook.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WebhookMessage {
    /// The initial response to the interaction.
    Original,
    /// A follow-up message.
    Id(MessageId),
}

impl From<MessageId> for WebhookMessage {
    fn from(id: MessageId) -> Self {
        Self::Id(id)
    }
}

#[derive(Debug)]
enum State {
    Pending(oneshot::Sender<EndpointResponse>),
    Responded,
}

/// Answers a single application command interaction.
///
/// An interaction gets exactly one initial response, through [`Self::respond`],
/// [`Self::acknowledge`] or [`Self::defer`]. That response becomes the body of the HTTP response
/// to Discord's request. After that, the initial response can be edited or deleted and follow-up
/// messages can be sent, all through the interaction's webhook.
///
/// The interaction token is valid for [`INTERACTION_TOKEN_LIFETIME`] after the interaction was
/// received. Every operation fails with [`InteractionError::TokenExpired`] once it has passed.
///
/// [`INTERACTION_TOKEN_LIFETIME`]: crate::constants::INTERACTION_TOKEN_LIFETIME
#[derive(Debug)]
pub struct Responder {
    interaction: CommandInteraction,
    http: Arc<Http>,
    received_at: Instant,
    state: State,
}

impl Responder {
    pub(crate) fn new(
        interaction: CommandInteraction,
        http: Arc<Http>,
        received_at: Instant,
        sender: oneshot::Sender<EndpointResponse>,
    ) -> Self {
        Self {
            interaction,
            http,
            received_at,
            state: State::Pending(sender),
        }
    }

    /// The interaction being answered.
    #[must_use]
    pub fn interaction(&self) -> &CommandInteraction {
        &self.interaction
    }

    /// The data of the invoked command, if the interaction carried any.
    #[must_use]
    pub fn data(&self) -> Option<&CommandData> {
        self.interaction.data.as_ref()
    }

    /// When the interaction was received.
    #[must_use]
    pub fn received_at(&self) -> Instant {
        self.received_at
    }

    /// Whether the interaction token can still be used.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.received_at.elapsed() < INTERACTION_TOKEN_LIFETIME
    }

    /// Whether the initial response was already sent.
    #[must_use]
    pub fn has_responded(&self) -> bool {
        matches!(self.state, State::Responded)
    }

    fn check_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(InteractionError::TokenExpired.into())
        }
    }

    /// Sends the initial response to the interaction.
    ///
    /// # Errors
    ///
    /// [`InteractionError::TokenExpired`] if the token is no longer valid, and
    /// [`InteractionError::AlreadyResponded`] if an initial response was already sent.
    pub fn respond(&mut self, response: CreateInteractionResponse) -> Result<()> {
        self.check_valid()?;
        if self.has_responded() {
            return Err(InteractionError::AlreadyResponded.into());
        }

        let body = response.to_json()?;
        if let State::Pending(sender) = std::mem::replace(&mut self.state, State::Responded) {
            if sender.send(EndpointResponse::ok(body)).is_err() {
                warn!(id = %self.interaction.id, "interaction response was no longer awaited");
            }
        }

        Ok(())
    }

    /// Acknowledges the interaction without a message.
    pub fn acknowledge(&mut self) -> Result<()> {
        self.respond(CreateInteractionResponse::Pong)
    }

    /// Acknowledges the interaction, showing a loading state until the initial response is
    /// edited through [`Self::edit_initial_response`].
    pub fn defer(&mut self) -> Result<()> {
        self.respond(CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()))
    }

    /// Acknowledges the interaction if no initial response was sent yet, and does nothing
    /// otherwise.
    pub fn ensure_acknowledged(&mut self) -> Result<()> {
        if self.has_responded() {
            return Ok(());
        }

        self.acknowledge()
    }

    /// Edits the initial response, or a follow-up message.
    #[instrument(skip_all, fields(id = %self.interaction.id, message = ?message))]
    pub async fn edit_response(
        &self,
        edit: &EditInteractionResponse,
        message: WebhookMessage,
    ) -> Result<Message> {
        self.check_valid()?;

        let token = &self.interaction.token;
        match message {
            WebhookMessage::Original => {
                self.http.edit_original_interaction_response(token, edit).await
            },
            WebhookMessage::Id(id) => self.http.edit_followup_message(token, id, edit).await,
        }
    }

    /// Deletes the initial response, or a follow-up message.
    #[instrument(skip_all, fields(id = %self.interaction.id, message = ?message))]
    pub async fn delete_response(&self, message: WebhookMessage) -> Result<()> {
        self.check_valid()?;

        let token = &self.interaction.token;
        match message {
            WebhookMessage::Original => self.http.delete_original_interaction_response(token).await,
            WebhookMessage::Id(id) => self.http.delete_followup_message(token, id).await,
        }
    }

    /// Edits the initial response.
    pub async fn edit_initial_response(&self, edit: &EditInteractionResponse) -> Result<Message> {
        self.edit_response(edit, WebhookMessage::Original).await
    }

    /// Deletes the initial response.
    pub async fn delete_initial_response(&self) -> Result<()> {
        self.delete_response(WebhookMessage::Original).await
    }

    /// Sends a follow-up message.
    #[instrument(skip_all, fields(id = %self.interaction.id))]
    pub async fn follow_up(&self, followup: &CreateInteractionResponseFollowup) -> Result<Message> {
        self.check_valid()?;

        self.http.create_followup_message(&self.interaction.token, followup).await
    }
}
