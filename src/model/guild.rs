//! Models relating to guilds and types that it owns.

use serde::{Deserialize, Serialize};

use crate::model::id::RoleId;
use crate::model::user::User;

/// Information about a member of a guild, as attached to an interaction.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Member {
    /// Attached User struct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// The member's nickname, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Vector of Ids of [`Role`]s given to the member.
    ///
    /// [`Role`]: https://discord.com/developers/docs/topics/permissions#role-object
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Indicator that the member hasn't accepted the rules of the guild yet.
    #[serde(default)]
    pub pending: bool,
}
