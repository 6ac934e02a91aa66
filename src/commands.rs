//! Management of the application's global commands, keeping the [`CommandRegistry`] cache in
//! step with the remote API.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::builder::CreateCommand;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::application::Command;
use crate::model::id::CommandId;
use crate::registry::CommandRegistry;

/// The global application commands of the application configured on the [`Http`] client.
///
/// Every successful call updates the declared commands of the [`CommandRegistry`]: listed,
/// created and edited commands are declared, deleted commands are forgotten. A failed call leaves
/// the registry untouched.
#[derive(Clone, Debug)]
pub struct GlobalCommands {
    http: Arc<Http>,
    registry: Arc<CommandRegistry>,
}

impl GlobalCommands {
    #[must_use]
    pub fn new(http: Arc<Http>, registry: Arc<CommandRegistry>) -> Self {
        Self {
            http,
            registry,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Fetches every global command and declares each of them.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Command>> {
        let commands = self.http.get_global_commands().await?;

        Ok(commands.into_iter().map(|command| self.registry.declare(command)).collect())
    }

    /// Creates a global command and declares it.
    ///
    /// **Note**: Creating a command with the same name as an already-existing global command will
    /// overwrite the old command.
    #[instrument(skip_all, fields(name = builder.get_name()))]
    pub async fn create(&self, builder: &CreateCommand) -> Result<Command> {
        let command = self.http.create_global_command(builder).await?;
        info!(id = %command.id, "created global command");

        Ok(self.registry.declare(command))
    }

    /// Edits a global command, replacing its declaration with the edited command.
    #[instrument(skip(self, builder))]
    pub async fn edit(&self, builder: &CreateCommand, id: CommandId) -> Result<Command> {
        let command = self.http.edit_global_command(id, builder).await?;

        Ok(self.registry.declare(command))
    }

    /// Deletes a global command and forgets its declaration.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CommandId) -> Result<()> {
        self.http.delete_global_command(id).await?;
        info!("deleted global command");

        self.registry.forget(id);
        Ok(())
    }
}
