use bitflags::bitflags;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::{CommandInteraction, PingInteraction};
use crate::internal::prelude::*;
use crate::model::id::InteractionId;

/// An interaction received through the interactions endpoint.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object)
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Interaction {
    Ping(PingInteraction),
    Command(CommandInteraction),
}

impl Interaction {
    /// Gets the interaction Id.
    #[must_use]
    pub fn id(&self) -> InteractionId {
        match self {
            Self::Ping(i) => i.id,
            Self::Command(i) => i.id,
        }
    }

    /// Gets the interaction type
    #[must_use]
    pub fn kind(&self) -> InteractionType {
        match self {
            Self::Ping(_) => InteractionType::Ping,
            Self::Command(_) => InteractionType::Command,
        }
    }
}

/// Reads the `type` tag of a raw interaction payload.
///
/// Returns `None` when the payload is not an object or the tag is missing or not a small
/// unsigned integer.
#[must_use]
pub fn peek_kind(value: &Value) -> Option<InteractionType> {
    let raw = value.as_object()?.get("type")?.as_u64()?;
    u8::try_from(raw).ok().map(InteractionType::from)
}

// Manual impl needed to emulate integer enum tags
impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        match peek_kind(&value).ok_or_else(|| D::Error::missing_field("type"))? {
            InteractionType::Ping => serde_json::from_value(value).map(Interaction::Ping),
            InteractionType::Command => serde_json::from_value(value).map(Interaction::Command),
            InteractionType::Unknown(kind) => {
                return Err(DeError::custom(format_args!("unknown interaction type {kind}")))
            },
        }
        .map_err(DeError::custom)
    }
}

enum_number! {
    /// The type of an Interaction.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InteractionType {
        Ping = 1,
        Command = 2,
        _ => Unknown(u8),
    }
}

bitflags! {
    /// The flags for an interaction response message.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-flags)
    /// ([only some are valid in this context](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-messages))
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct InteractionResponseFlags: u64 {
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Interaction message will only be visible to sender and will
        /// be quickly deleted.
        const EPHEMERAL = 1 << 6;
        /// Does not trigger push notifications or desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl Serialize for InteractionResponseFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for InteractionResponseFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}
