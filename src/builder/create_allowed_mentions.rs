use serde::{Deserialize, Serialize};

use crate::model::id::{RoleId, UserId};

/// A category of mentions that is parsed out of message content.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParseValue {
    Everyone,
    Users,
    Roles,
}

/// A builder to manage the allowed mentions on an interaction response, follow-up, or edit.
///
/// # Examples
///
/// ```rust
/// use interactions_endpoint::builder::{CreateAllowedMentions as Am, ParseValue};
///
/// // Mention only the user 110372470472613888
/// let m = Am::default().users(vec![110372470472613888]);
///
/// // Mention all users and the role 182894738100322304
/// let m = Am::default().parse(ParseValue::Users).roles(vec![182894738100322304]);
///
/// // Mention all roles and users, but not everyone
/// let m = Am::default().parse(ParseValue::Users).parse(ParseValue::Roles);
/// ```
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#allowed-mentions-object).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct CreateAllowedMentions {
    parse: Vec<ParseValue>,
    users: Vec<UserId>,
    roles: Vec<RoleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replied_user: Option<bool>,
}

impl CreateAllowedMentions {
    /// Add a value that's allowed to be mentioned.
    ///
    /// If passing in [`ParseValue::Users`] or [`ParseValue::Roles`], later calling [`Self::users`]
    /// or [`Self::roles`] will not work as intended, as the [`ParseValue`] takes precedence.
    #[inline]
    pub fn parse(mut self, value: ParseValue) -> Self {
        if !self.parse.contains(&value) {
            self.parse.push(value);
        }
        self
    }

    /// Clear all the values that would be mentioned.
    #[inline]
    pub fn empty_parse(mut self) -> Self {
        self.parse.clear();
        self
    }

    /// Sets the *specific* users that will be allowed mentionable.
    #[inline]
    pub fn users(mut self, users: impl IntoIterator<Item = impl Into<UserId>>) -> Self {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the *specific* roles that will be allowed mentionable.
    #[inline]
    pub fn roles(mut self, roles: impl IntoIterator<Item = impl Into<RoleId>>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Makes the reply mention/ping the user.
    #[inline]
    pub fn replied_user(mut self, mention_user: bool) -> Self {
        self.replied_user = Some(mention_user);
        self
    }
}
