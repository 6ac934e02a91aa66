//! A set of constants used by the library.

use std::time::Duration;

/// The base URI of the REST API, including the API version in use.
pub const API_BASE: &str = "https://discord.com/api/v10";

/// The API version the library targets.
pub const API_VERSION: u8 = 10;

/// The [UserAgent] sent along with every request.
///
/// [UserAgent]: ::reqwest::header::USER_AGENT
pub const USER_AGENT: &str = concat!(
    "DiscordBot (https://docs.rs/interactions-endpoint, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// How long an interaction token stays valid after the interaction was received.
pub const INTERACTION_TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// How long Discord waits for the initial response to an interaction before failing it.
pub const INITIAL_RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Default timeout applied to every outbound REST request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the header carrying the hex encoded Ed25519 request signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";

/// Name of the header carrying the timestamp the request signature covers.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";
