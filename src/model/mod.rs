//! Mappings of objects received from the API, limited to what the interactions endpoint inspects
//! or returns.

pub mod application;
pub mod channel;
pub mod guild;
pub mod id;
pub mod prelude;
pub mod timestamp;
pub mod user;
