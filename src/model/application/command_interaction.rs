use serde::{Deserialize, Serialize};

use crate::internal::prelude::*;
use crate::model::application::{CommandOptionType, CommandType};
use crate::model::guild::Member;
use crate::model::id::{ApplicationId, ChannelId, CommandId, GuildId, InteractionId};
use crate::model::user::User;

/// An interaction when a user invokes a slash command.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct CommandInteraction {
    /// Id of the interaction.
    pub id: InteractionId,
    /// Id of the application this interaction is for.
    pub application_id: ApplicationId,
    /// The data of the interaction which was triggered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CommandData>,
    /// The guild Id this interaction was sent from, if there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// The channel Id this interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    /// The `member` data for the invoking user.
    ///
    /// **Note**: It is only present if the interaction is triggered in a guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// The `user` object for the invoking user.
    ///
    /// **Note**: It is only present if the interaction is triggered in a DM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// A continuation token for responding to the interaction.
    pub token: String,
    /// Always `1`.
    pub version: u8,
    /// The selected language of the invoking user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl CommandInteraction {
    /// The invoking user, whether the command was run in a guild or a DM.
    #[must_use]
    pub fn invoker(&self) -> Option<&User> {
        self.member.as_ref().and_then(|m| m.user.as_ref()).or(self.user.as_ref())
    }
}

/// The command data payload.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-application-command-data-structure).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct CommandData {
    /// The Id of the invoked command.
    pub id: CommandId,
    /// The name of the invoked command.
    pub name: String,
    /// The application command type of the triggered application command.
    #[serde(rename = "type", default = "CommandType::default")]
    pub kind: CommandType,
    /// The parameters and the given values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandDataOption>,
}

impl CommandData {
    /// Finds a top-level option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&CommandDataOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// A set of a parameter and a value from the user.
///
/// All options have names and an option can either be a parameter and input `value` or it can
/// denote a sub-command or group, in which case it will contain a top-level key and another vector
/// of `options`.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-application-command-interaction-data-option-structure).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct CommandDataOption {
    /// The name of the parameter.
    pub name: String,
    /// The type of the parameter.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CommandOptionType>,
    /// The value given by the user, absent for sub-commands and groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// The nested options of a sub-command or group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandDataOption>,
}

impl CommandDataOption {
    /// Finds a nested option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&CommandDataOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// The value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref()?.as_str()
    }

    /// The value as an integer, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_ref()?.as_i64()
    }

    /// The value as a floating point number, if it is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_ref()?.as_f64()
    }

    /// The value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_ref()?.as_bool()
    }
}
