//! In-memory record store and creation-event broadcast for the Scribe server.
//!
//! Two components live here:
//!
//! - [`RecordStore`] / [`MemoryRecordStore`]: the single owner of the three
//!   domain tables (messages by id, authors by name, author→messages index),
//!   exposing get/list/count/create/update operations
//! - [`MessageHub`]: a broadcast channel fanning newly created messages out
//!   to zero or more live [`Subscription`]s
//!
//! The hub is injected into the store at construction; the store publishes
//! every created message after releasing its table lock.

pub mod broadcast;
pub mod error;
pub mod memory;
pub mod store;
pub mod token;

pub use broadcast::*;
pub use error::*;
pub use memory::*;
pub use store::*;
