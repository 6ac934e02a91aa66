//! The command registry: which handler runs for which command, and which commands the
//! application has declared.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::internal::prelude::*;
use crate::model::application::{Command, CommandData};
use crate::model::id::CommandId;
use crate::responder::Responder;

/// The trait for handling an application command interaction.
///
/// A handler answers through the [`Responder`] it is given. If it returns without responding, the
/// interaction is acknowledged on its behalf. An error returned from the handler is logged, and
/// is otherwise treated like returning without a response.
///
/// The initial response has to be sent within the endpoint's response timeout, 3 seconds by
/// default. Work that may take longer should [`Responder::defer`] first and then edit the
/// initial response once done.
///
/// ```rust
/// use interactions_endpoint::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
/// use interactions_endpoint::registry::CommandHandler;
/// use interactions_endpoint::responder::Responder;
/// use interactions_endpoint::{async_trait, Result};
///
/// struct Ping;
///
/// #[async_trait]
/// impl CommandHandler for Ping {
///     async fn handle(&self, responder: &mut Responder) -> Result<()> {
///         let message = CreateInteractionResponseMessage::new().content("Pong!");
///         responder.respond(CreateInteractionResponse::Message(message))
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Dispatched when an application command interaction bound to this handler is received.
    async fn handle(&self, responder: &mut Responder) -> Result<()>;
}

/// Maps command names and command Ids to [`CommandHandler`]s, and caches the commands declared
/// for the application.
///
/// The registry is meant to be shared behind an [`Arc`]: every method takes `&self`, and a
/// binding or declaration is visible to other threads as a whole or not at all.
///
/// Bindings by name and by Id are independent, and may both refer to the same handler. Binding
/// a key again replaces the previous handler. Bindings are never removed.
#[derive(Default)]
pub struct CommandRegistry {
    commands: DashMap<CommandId, Command>,
    by_id: DashMap<CommandId, Arc<dyn CommandHandler>>,
    by_name: DashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the command as declared, replacing any previous declaration with the same Id.
    pub fn declare(&self, command: Command) -> Command {
        debug!(id = %command.id, name = %command.name, "declaring command");
        self.commands.insert(command.id, command.clone());
        command
    }

    /// Removes a declared command from the cache, returning it if it was known.
    pub fn forget(&self, id: CommandId) -> Option<Command> {
        debug!(%id, "forgetting command");
        self.commands.remove(&id).map(|(_, command)| command)
    }

    /// Gets a declared command by its Id.
    #[must_use]
    pub fn command(&self, id: CommandId) -> Option<Command> {
        self.commands.get(&id).map(|entry| entry.value().clone())
    }

    /// Gets all declared commands, in no particular order.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.commands.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Binds a handler to the command with the given Id.
    pub fn bind_id(&self, id: CommandId, handler: Arc<dyn CommandHandler>) {
        debug!(%id, "binding handler to command id");
        self.by_id.insert(id, handler);
    }

    /// Binds a handler to every command with the given name.
    pub fn bind_name(&self, name: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        let name = name.into();
        debug!(%name, "binding handler to command name");
        self.by_name.insert(name, handler);
    }

    /// Finds the handler for an invoked command. A binding by name takes precedence over a
    /// binding by Id.
    #[must_use]
    pub fn handler_for(&self, data: &CommandData) -> Option<Arc<dyn CommandHandler>> {
        if let Some(entry) = self.by_name.get(data.name.as_str()) {
            return Some(Arc::clone(entry.value()));
        }

        self.by_id.get(&data.id).map(|entry| Arc::clone(entry.value()))
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.len())
            .field("ids", &self.by_id.iter().map(|e| *e.key()).collect::<Vec<_>>())
            .field("names", &self.by_name.iter().map(|e| e.key().clone()).collect::<Vec<_>>())
            .finish()
    }
}
