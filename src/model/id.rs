//! A collection of newtypes defining type-strong IDs.

use std::fmt;
use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;

use serde::de::{Deserializer, Error as DeError, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

macro_rules! id_u64 {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
            pub struct $name(NonZeroU64);

            impl $name {
                /// Creates a new Id from a u64
                ///
                /// # Panics
                /// Panics if `id` is zero.
                #[inline]
                #[must_use]
                #[track_caller]
                pub const fn new(id: u64) -> Self {
                    match NonZeroU64::new(id) {
                        Some(inner) => Self(inner),
                        None => panic!(concat!("Attempted to call ", stringify!($name), "::new with invalid (0) value"))
                    }
                }

                /// Retrieves the inner `id` as a [`u64`].
                #[inline]
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0.get()
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&self.get()).finish()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl From<NonZeroU64> for $name {
                fn from(id: NonZeroU64) -> $name {
                    $name(id)
                }
            }

            impl From<u64> for $name {
                #[track_caller]
                fn from(id: u64) -> $name {
                    $name::new(id)
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.get()
                }
            }

            impl FromStr for $name {
                type Err = ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.parse::<NonZeroU64>().map(Self)
                }
            }

            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(&self.0)
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    deserializer.deserialize_any(SnowflakeVisitor).map(Self)
                }
            }
        )*
    }
}

/// Snowflakes are sent as strings, but older payloads and tests may carry plain integers.
struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = NonZeroU64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-zero string or integer snowflake")
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
        NonZeroU64::new(value).ok_or_else(|| E::custom("invalid value, expected non-zero"))
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
        let value = u64::try_from(value).map_err(E::custom)?;
        self.visit_u64(value)
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }
}

id_u64! {
    /// An identifier for an Application.
    ApplicationId;
    /// An identifier for a Channel.
    ChannelId;
    /// An identifier for a slash command.
    CommandId;
    /// An identifier for a slash command version Id.
    CommandVersionId;
    /// An identifier for a Guild.
    GuildId;
    /// An identifier for an interaction.
    InteractionId;
    /// An identifier for a Message.
    MessageId;
    /// An identifier for a Role.
    RoleId;
    /// An identifier for a User.
    UserId;
}
