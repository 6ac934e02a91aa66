//! Models about application commands and the interactions invoking them.

mod command;
pub use command::*;
mod command_interaction;
pub use command_interaction::*;
mod interaction;
pub use interaction::*;
mod ping_interaction;
pub use ping_interaction::*;

enum_number! {
    /// The type of an interaction response.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-interaction-callback-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InteractionResponseType {
        /// Acknowledges a ping. Also accepted as a bare acknowledgement of a command.
        Pong = 1,
        /// Responds to the interaction with a message.
        ChannelMessageWithSource = 4,
        /// Acknowledges the interaction; the user sees a loading state until the initial response
        /// is edited.
        DeferredChannelMessageWithSource = 5,
        _ => Unknown(u8),
    }
}
