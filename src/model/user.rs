//! User information-related models.

use serde::{Deserialize, Serialize};

use crate::model::id::UserId;

/// Information about a user.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's creation date.
    pub id: UserId,
    /// The account's username. Changing username will trigger a discriminator change if the
    /// username+discriminator pair becomes non-unique.
    #[serde(rename = "username")]
    pub name: String,
    /// The account's discriminator, `"0"` for users on the new username system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// The account's display name, if it is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    /// Optional avatar hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
}
