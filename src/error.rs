use std::error::Error as StdError;
use std::fmt;

use serde_json::Error as JsonError;

use crate::http::HttpError;
use crate::responder::InteractionError;

/// The common result type between most library functions.
///
/// The library exposes functions which, for a result type, exposes only one type, rather than the
/// usual 2 (`Result<T, Error>`). This is because all functions that return a result return
/// the crate's [`Error`], so this is implied, and a "simpler" result is used.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A common error enum returned by most of the library's functionality within a custom
/// [`Result`].
///
/// The most common error types, the [`HttpError`] and [`InteractionError`] enums, are both
/// wrapped around this in the form of the [`Self::Http`] and [`Self::Interaction`] variants.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An error from the [`http`] module, such as an unexpected status code returned by the REST
    /// API.
    ///
    /// [`http`]: crate::http
    Http(HttpError),
    /// An error while serializing or deserializing a payload.
    Json(JsonError),
    /// A handler broke the interaction response protocol, by responding twice or using an
    /// expired token.
    Interaction(InteractionError),
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Error {
        Error::Http(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Error {
        Error::Json(e)
    }
}

impl From<InteractionError> for Error {
    fn from(e: InteractionError) -> Error {
        Error::Interaction(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(inner) => fmt::Display::fmt(&inner, f),
            Self::Json(inner) => fmt::Display::fmt(&inner, f),
            Self::Interaction(inner) => fmt::Display::fmt(&inner, f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Http(inner) => Some(inner),
            Self::Json(inner) => Some(inner),
            Self::Interaction(inner) => Some(inner),
        }
    }
}
