//! A set of exports which can be helpful to use.
//!
//! Note that the `EndpointLibError` re-export is equivalent to [`interactions_endpoint::Error`],
//! although is re-exported as a separate name to remove likely ambiguity with other crate error
//! enums.
//!
//! # Examples
//!
//! Import all of the exports:
//!
//! ```rust
//! use interactions_endpoint::prelude::*;
//! ```
//!
//! [`interactions_endpoint::Error`]: crate::Error

pub use crate::commands::GlobalCommands;
pub use crate::endpoint::{EndpointError, EndpointRequest, EndpointResponse, InteractionsEndpoint};
pub use crate::error::Error as EndpointLibError;
pub use crate::http::{Http, HttpBuilder, HttpError};
pub use crate::registry::{CommandHandler, CommandRegistry};
pub use crate::responder::{InteractionError, Responder, WebhookMessage};
pub use crate::verifier::Verifier;
