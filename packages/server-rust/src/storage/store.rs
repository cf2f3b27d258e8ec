//! Record store trait.
//!
//! Defines [`RecordStore`], the interface the HTTP handlers interact with,
//! and [`NewMessage`], the creation input. The store is the exclusive owner
//! of the message table, the author table, and the author→messages index;
//! no other component mutates them.
//!
//! Used as `Arc<dyn RecordStore>`.

use scribe_core::{Author, Message, MessageId};

use super::error::StoreError;

/// Input for [`RecordStore::create_message`].
///
/// The author fields beyond `author_name` are recorded only when the name
/// is seen for the first time; for an existing author they are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Optional message body.
    pub content: Option<String>,
    /// Author natural key. Resolves to an existing author or creates one.
    pub author_name: String,
    /// Optional age for a newly created author.
    pub author_age: Option<i32>,
    /// Optional nationality for a newly created author.
    pub author_nationality: Option<String>,
}

/// The in-memory relational store over authors and messages.
///
/// Every operation completes as a unit: no caller ever observes a partially
/// applied creation. Implementations must serialize mutations; reads may run
/// concurrently with each other.
pub trait RecordStore: Send + Sync {
    /// Looks up a message by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MessageNotFound`] when no message has that id.
    fn get_message(&self, id: &MessageId) -> Result<Message, StoreError>;

    /// Lists an author's messages in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthorNotFound`] when no author has that name,
    /// and [`StoreError::NoMessagesForAuthor`] when the author has no
    /// recorded messages. The latter is reported as an error rather than an
    /// empty list.
    fn list_messages(&self, author_name: &str) -> Result<Vec<Message>, StoreError>;

    /// Returns every known author in insertion order.
    fn list_authors(&self) -> Vec<Author>;

    /// Current cardinality of the message table.
    fn count_messages(&self) -> usize;

    /// Current cardinality of the author table.
    fn count_authors(&self) -> usize;

    /// Creates a message, creating its author on first reference.
    ///
    /// Resolves or creates the author, mints a fresh message identifier,
    /// inserts the record, appends it to the author's index entry, and
    /// publishes the new message to the notification hub. Infallible:
    /// identifier minting re-draws until unique.
    fn create_message(&self, input: NewMessage) -> Message;

    /// Replaces a message's content field in place. The author reference is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MessageNotFound`] when no message has that id.
    fn update_message(&self, id: &MessageId, content: Option<String>)
        -> Result<Message, StoreError>;
}
