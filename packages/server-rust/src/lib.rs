//! Scribe Server — axum HTTP/WebSocket facade over an in-memory
//! author/message store with live creation push.

pub mod network;
pub mod storage;

pub use network::NetworkModule;
pub use storage::{MemoryRecordStore, MessageHub, RecordStore};
