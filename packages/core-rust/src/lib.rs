//! Scribe Core — author/message domain types and wire schemas.

pub mod messages;
pub mod types;

pub use types::{Author, AuthorId, Message, MessageId};
