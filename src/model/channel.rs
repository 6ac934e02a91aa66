//! Models relating to channels and the messages within them.

use serde::{Deserialize, Serialize};

use crate::internal::prelude::*;
use crate::model::id::{ChannelId, MessageId};
use crate::model::timestamp::Timestamp;
use crate::model::user::User;

/// A representation of a message sent through a webhook, as returned when following up or
/// editing an interaction response.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message. Can be used to calculate the creation date of the message.
    pub id: MessageId,
    /// The Id of the [`Channel`] that the message was sent to.
    ///
    /// [`Channel`]: https://discord.com/developers/docs/resources/channel#channel-object
    pub channel_id: ChannelId,
    /// The user that sent the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
    /// Array of embeds sent with the message.
    #[serde(default)]
    pub embeds: Vec<Value>,
    /// Indicator of whether the command is to be played back via text-to-speech.
    #[serde(default)]
    pub tts: bool,
    /// When the message was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// The timestamp of the last time the message was updated, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<Timestamp>,
}
