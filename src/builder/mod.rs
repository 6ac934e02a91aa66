//! A set of builders used to make using methods on certain structs simpler to use.
//!
//! These are used when not all parameters are required, all parameters are optional, and/or sane
//! default values for required parameters can be applied by a builder.

mod create_allowed_mentions;
mod create_command;
mod create_embed;
mod create_interaction_response;
mod create_interaction_response_followup;
mod edit_interaction_response;

pub use create_allowed_mentions::*;
pub use create_command::*;
pub use create_embed::*;
pub use create_interaction_response::*;
pub use create_interaction_response_followup::*;
pub use edit_interaction_response::*;
