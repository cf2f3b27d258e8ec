//! Wire message schemas for the HTTP API and the push channel.
//!
//! All structs use `#[serde(rename_all = "camelCase")]` and serialize to
//! JSON. Created messages are pushed to subscribers as the plain
//! [`Message`](crate::types::Message) shape; there is no extra envelope.

pub mod api;

pub use api::*;
