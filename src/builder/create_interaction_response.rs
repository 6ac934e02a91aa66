use serde::ser::{Error as _, SerializeMap as _};
use serde::{Serialize, Serializer};

use super::{CreateAllowedMentions, CreateEmbed};
use crate::internal::prelude::*;
use crate::model::application::{InteractionResponseFlags, InteractionResponseType};

/// The initial response to an interaction, sent back as the body of the interactions endpoint's
/// HTTP response.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object).
#[derive(Clone, Debug)]
#[must_use]
pub enum CreateInteractionResponse {
    /// Acknowledges a Ping. Also accepted as a bare acknowledgement of a command.
    ///
    /// Corresponds to Discord's `PONG`.
    Pong,
    /// Responds to an interaction with a message.
    ///
    /// Corresponds to Discord's `CHANNEL_MESSAGE_WITH_SOURCE`.
    Message(CreateInteractionResponseMessage),
    /// Acknowledges the interaction in order to edit a response later. The user sees a loading
    /// state.
    ///
    /// Only the [`CreateInteractionResponseMessage::flags`] of the payload are taken into account.
    ///
    /// Corresponds to Discord's `DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE`.
    Defer(CreateInteractionResponseMessage),
}

impl CreateInteractionResponse {
    /// The callback type this response is sent as.
    #[must_use]
    pub fn kind(&self) -> InteractionResponseType {
        match self {
            Self::Pong => InteractionResponseType::Pong,
            Self::Message(_) => InteractionResponseType::ChannelMessageWithSource,
            Self::Defer(_) => InteractionResponseType::DeferredChannelMessageWithSource,
        }
    }

    /// Serializes the response into the JSON body Discord expects.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for CreateInteractionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let data = match self {
            Self::Pong => None,
            Self::Message(data) => Some(serde_json::to_value(data).map_err(S::Error::custom)?),
            Self::Defer(data) => Some(match data.flags {
                Some(flags) => json!({ "flags": flags }),
                None => json!({}),
            }),
        };

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind())?;
        if let Some(data) = data {
            map.serialize_entry("data", &data)?;
        }
        map.end()
    }
}

/// The message payload of a [`CreateInteractionResponse::Message`].
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-messages).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct CreateInteractionResponseMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    tts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeds: Option<Vec<CreateEmbed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_mentions: Option<CreateAllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<InteractionResponseFlags>,
}

impl CreateInteractionResponseMessage {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the message is text-to-speech.
    ///
    /// Think carefully before setting this to `true`.
    ///
    /// Defaults to `false`.
    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Set the content of the message.
    ///
    /// **Note**: Message contents must be under 2000 unicode code points.
    #[inline]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Adds an embed to the message.
    ///
    /// Calling this while editing a message will overwrite existing embeds.
    pub fn add_embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }

    /// Sets a single embed to include in the message
    ///
    /// Calling this will overwrite the embed list. To append embeds, call [`Self::add_embed`]
    /// instead.
    pub fn embed(self, embed: CreateEmbed) -> Self {
        self.embeds(vec![embed])
    }

    /// Sets a list of embeds to include in the message.
    ///
    /// Calling this will overwrite the embed list. To append embeds, call [`Self::add_embed`]
    /// instead.
    pub fn embeds(mut self, embeds: Vec<CreateEmbed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    /// Set the allowed mentions for the message.
    pub fn allowed_mentions(mut self, allowed_mentions: CreateAllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Sets the flags for the message.
    pub fn flags(mut self, flags: InteractionResponseFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Adds or removes the ephemeral flag.
    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        let mut flags = self.flags.unwrap_or_else(InteractionResponseFlags::empty);
        flags.set(InteractionResponseFlags::EPHEMERAL, ephemeral);

        self.flags = Some(flags);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pong_has_no_data() {
        assert_eq!(CreateInteractionResponse::Pong.to_json().unwrap(), json!({"type": 1}));
    }

    #[test]
    fn test_message() {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content("pong!").ephemeral(true),
        );

        assert_eq!(
            response.to_json().unwrap(),
            json!({"type": 4, "data": {"content": "pong!", "flags": 64}})
        );
    }

    #[test]
    fn test_defer_keeps_only_flags() {
        let response =
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().content("x"));
        assert_eq!(response.to_json().unwrap(), json!({"type": 5, "data": {}}));

        let response =
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true));
        assert_eq!(response.to_json().unwrap(), json!({"type": 5, "data": {"flags": 64}}));
    }
}
