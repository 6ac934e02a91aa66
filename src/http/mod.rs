//! The HTTP module which provides functions for performing requests to the endpoints of Discord's
//! REST API that an interactions endpoint needs.
//!
//! These are the global application command endpoints, used through [`GlobalCommands`], and the
//! interaction webhook endpoints, used through a [`Responder`]. Every request is authorized with
//! the bot token and resolved against a configurable API base.
//!
//! [`GlobalCommands`]: crate::commands::GlobalCommands
//! [`Responder`]: crate::responder::Responder

mod client;
mod error;
pub mod request;
pub mod routing;

use reqwest::Method;
pub use reqwest::StatusCode;

pub use self::client::*;
pub use self::error::*;
pub use self::request::Request;
pub use self::routing::Route;

/// The method a [`Request`] is performed with.
///
/// This is needed because `reqwest`'s `Method` enum does not derive Copy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum LightMethod {
    /// Indicates that a route is for the `DELETE` method only.
    Delete,
    /// Indicates that a route is for the `GET` method only.
    Get,
    /// Indicates that a route is for the `PATCH` method only.
    Patch,
    /// Indicates that a route is for the `POST` method only.
    Post,
}

impl LightMethod {
    #[must_use]
    pub const fn reqwest_method(self) -> Method {
        match self {
            Self::Delete => Method::DELETE,
            Self::Get => Method::GET,
            Self::Patch => Method::PATCH,
            Self::Post => Method::POST,
        }
    }
}
