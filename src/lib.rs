//! A library for serving Discord's interactions endpoint over HTTP.
//!
//! Instead of receiving interactions over the gateway, an application can configure an
//! *interactions endpoint URL*. Discord then POSTs every interaction to that URL, signed with the
//! application's Ed25519 key, and expects exactly one response per interaction.
//!
//! This crate provides the pieces between the HTTP server of your choice and your command
//! handlers:
//!
//! - a [`Verifier`] for the request signature;
//! - a [`CommandRegistry`] binding command names and ids to [`CommandHandler`]s, which also caches
//!   the application's declared commands;
//! - [`GlobalCommands`], a thin client for the global application-command endpoints which keeps
//!   the registry's cache in sync;
//! - the [`InteractionsEndpoint`] dispatcher, turning a raw request into a response;
//! - a [`Responder`] per interaction, enforcing the one-response rule and the 15 minute token
//!   lifetime, and exposing follow-up, edit and delete calls.
//!
//! The crate does not run an HTTP server itself. See `demos/axum_endpoint.rs` for a complete
//! wiring with axum.
//!
//! [`Verifier`]: crate::verifier::Verifier
//! [`CommandRegistry`]: crate::registry::CommandRegistry
//! [`CommandHandler`]: crate::registry::CommandHandler
//! [`GlobalCommands`]: crate::commands::GlobalCommands
//! [`InteractionsEndpoint`]: crate::endpoint::InteractionsEndpoint
//! [`Responder`]: crate::responder::Responder
#![doc(html_root_url = "https://docs.rs/interactions-endpoint/*")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
mod internal;

pub mod builder;
pub mod commands;
pub mod constants;
pub mod endpoint;
pub mod http;
pub mod model;
pub mod prelude;
pub mod registry;
pub mod responder;
pub mod verifier;

mod error;

pub use crate::error::{Error, Result};

// Re-exports of crates used in the public API.
pub use async_trait::async_trait;
