//! In-memory [`RecordStore`] implementation.
//!
//! All three tables live behind a single `parking_lot::RwLock` so that a
//! creation (author resolve, message insert, index append) is applied as
//! one unit; readers share the lock and never observe a half-applied write.
//! The notification hub is injected at construction and publishing happens
//! after the write guard is dropped, so a slow subscriber set can never
//! stall writers.

use std::collections::HashMap;

use metrics::counter;
use parking_lot::RwLock;
use scribe_core::{Author, AuthorId, Message, MessageId};
use tracing::debug;

use super::broadcast::MessageHub;
use super::error::StoreError;
use super::store::{NewMessage, RecordStore};
use super::token;

/// The three domain tables plus the author insertion-order list.
#[derive(Debug, Default)]
struct Tables {
    /// Message table, keyed by message identifier.
    messages: HashMap<MessageId, Message>,
    /// Author table, keyed by name (the natural key).
    authors: HashMap<String, Author>,
    /// Author names in first-seen order, for stable listing.
    author_order: Vec<String>,
    /// Author identifier → that author's message identifiers, in creation order.
    author_index: HashMap<AuthorId, Vec<MessageId>>,
}

/// Mints an author identifier not present in the index.
///
/// Every author ever created has an index entry, so the index keys are the
/// full set of live author identifiers. A collision re-draws.
fn mint_author_id(author_index: &HashMap<AuthorId, Vec<MessageId>>) -> AuthorId {
    loop {
        let id = AuthorId(token::random_token());
        if !author_index.contains_key(&id) {
            return id;
        }
    }
}

/// Mints a message identifier not present in the message table.
fn mint_message_id(messages: &HashMap<MessageId, Message>) -> MessageId {
    loop {
        let id = MessageId(token::random_token());
        if !messages.contains_key(&id) {
            return id;
        }
    }
}

/// In-memory record store, instantiated once per process (or once per test).
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
    hub: MessageHub,
}

impl MemoryRecordStore {
    /// Creates an empty store that announces creations on `hub`.
    #[must_use]
    pub fn new(hub: MessageHub) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            hub,
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn get_message(&self, id: &MessageId) -> Result<Message, StoreError> {
        let tables = self.tables.read();
        tables
            .messages
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::MessageNotFound { id: id.clone() })
    }

    fn list_messages(&self, author_name: &str) -> Result<Vec<Message>, StoreError> {
        let tables = self.tables.read();

        let author = tables
            .authors
            .get(author_name)
            .ok_or_else(|| StoreError::AuthorNotFound {
                name: author_name.to_string(),
            })?;

        // An author without recorded messages is an error, not an empty
        // list. Index entries are only ever created together with a first
        // message, so in practice this arm means "no entry at all".
        let ids = tables
            .author_index
            .get(&author.id)
            .filter(|ids| !ids.is_empty())
            .ok_or_else(|| StoreError::NoMessagesForAuthor {
                name: author_name.to_string(),
            })?;

        Ok(ids
            .iter()
            .filter_map(|id| tables.messages.get(id).cloned())
            .collect())
    }

    fn list_authors(&self) -> Vec<Author> {
        let tables = self.tables.read();
        tables
            .author_order
            .iter()
            .filter_map(|name| tables.authors.get(name).cloned())
            .collect()
    }

    fn count_messages(&self) -> usize {
        self.tables.read().messages.len()
    }

    fn count_authors(&self) -> usize {
        self.tables.read().authors.len()
    }

    fn create_message(&self, input: NewMessage) -> Message {
        let message = {
            let mut tables = self.tables.write();

            let author = if let Some(author) = tables.authors.get(&input.author_name) {
                author.clone()
            } else {
                let author = Author {
                    id: mint_author_id(&tables.author_index),
                    name: input.author_name.clone(),
                    age: input.author_age,
                    nationality: input.author_nationality.clone(),
                };
                tables.author_order.push(author.name.clone());
                tables.authors.insert(author.name.clone(), author.clone());
                counter!("scribe_authors_created_total").increment(1);
                debug!(author = %author.name, id = %author.id, "created author");
                author
            };

            let id = mint_message_id(&tables.messages);
            let message = Message {
                id: id.clone(),
                content: input.content,
                author,
            };

            tables.messages.insert(id.clone(), message.clone());
            tables
                .author_index
                .entry(message.author.id.clone())
                .or_default()
                .push(id);

            message
        };

        counter!("scribe_messages_created_total").increment(1);
        debug!(id = %message.id, author = %message.author.name, "created message");

        // Publish outside the table lock; delivery is fire-and-forget.
        self.hub.publish(message.clone());

        message
    }

    fn update_message(
        &self,
        id: &MessageId,
        content: Option<String>,
    ) -> Result<Message, StoreError> {
        let updated = {
            let mut tables = self.tables.write();
            let message = tables
                .messages
                .get_mut(id)
                .ok_or_else(|| StoreError::MessageNotFound { id: id.clone() })?;
            message.content = content;
            message.clone()
        };

        counter!("scribe_messages_updated_total").increment(1);
        debug!(id = %updated.id, "updated message content");

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn make_store() -> MemoryRecordStore {
        MemoryRecordStore::new(MessageHub::default())
    }

    fn new_message(content: &str, author_name: &str) -> NewMessage {
        NewMessage {
            content: Some(content.to_string()),
            author_name: author_name.to_string(),
            author_age: None,
            author_nationality: None,
        }
    }

    #[test]
    fn created_identifiers_are_twenty_char_tokens() {
        let store = make_store();
        let message = store.create_message(new_message("hello", "Ada"));

        assert_eq!(message.id.0.len(), 20);
        assert_eq!(message.author.id.0.len(), 20);
        assert_ne!(message.id.0, message.author.id.0);
    }

    #[test]
    fn create_then_get_returns_the_same_record() {
        let store = make_store();
        let created = store.create_message(new_message("hello", "Ada"));

        let fetched = store.get_message(&created.id).unwrap();
        assert_eq!(fetched.content.as_deref(), Some("hello"));
        assert_eq!(fetched.author.name, "Ada");
        assert_eq!(fetched, created);
    }

    #[test]
    fn same_author_name_resolves_to_one_author_record() {
        let store = make_store();
        let first = store.create_message(new_message("one", "Ada"));
        let second = store.create_message(new_message("two", "Ada"));

        assert_eq!(first.author.id, second.author.id);
        assert_eq!(store.count_authors(), 1);
        assert_eq!(store.count_messages(), 2);
    }

    #[test]
    fn author_fields_from_later_creates_are_ignored() {
        let store = make_store();
        store.create_message(NewMessage {
            content: Some("one".to_string()),
            author_name: "Ada".to_string(),
            author_age: Some(36),
            author_nationality: None,
        });
        let second = store.create_message(NewMessage {
            content: Some("two".to_string()),
            author_name: "Ada".to_string(),
            author_age: Some(99),
            author_nationality: Some("British".to_string()),
        });

        // The author record was fixed by the first creation.
        assert_eq!(second.author.age, Some(36));
        assert_eq!(second.author.nationality, None);
    }

    #[test]
    fn list_messages_preserves_creation_order() {
        let store = make_store();
        store.create_message(new_message("hello", "Ada"));
        store.create_message(new_message("interleaved", "Grace"));
        store.create_message(new_message("world", "Ada"));

        let listed = store.list_messages("Ada").unwrap();
        let contents: Vec<_> = listed
            .iter()
            .map(|m| m.content.clone().unwrap())
            .collect();
        assert_eq!(contents, vec!["hello", "world"]);
    }

    #[test]
    fn list_authors_returns_insertion_order() {
        let store = make_store();
        store.create_message(new_message("a", "Ada"));
        store.create_message(new_message("b", "Grace"));
        store.create_message(new_message("c", "Ada"));
        store.create_message(new_message("d", "Edsger"));

        let names: Vec<_> = store.list_authors().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Ada", "Grace", "Edsger"]);
    }

    #[test]
    fn update_replaces_content_and_preserves_author() {
        let store = make_store();
        let created = store.create_message(new_message("before", "Ada"));

        let updated = store
            .update_message(&created.id, Some("after".to_string()))
            .unwrap();
        assert_eq!(updated.content.as_deref(), Some("after"));
        assert_eq!(updated.author, created.author);

        let fetched = store.get_message(&created.id).unwrap();
        assert_eq!(fetched.content.as_deref(), Some("after"));
        assert_eq!(fetched.author, created.author);
    }

    #[test]
    fn update_can_clear_content() {
        let store = make_store();
        let created = store.create_message(new_message("text", "Ada"));

        let updated = store.update_message(&created.id, None).unwrap();
        assert_eq!(updated.content, None);
    }

    #[test]
    fn get_unknown_message_fails() {
        let store = make_store();
        let id = MessageId("0000000000000000ffff".to_string());

        let err = store.get_message(&id).unwrap_err();
        assert_eq!(err, StoreError::MessageNotFound { id });
    }

    #[test]
    fn update_unknown_message_fails() {
        let store = make_store();
        let id = MessageId("0000000000000000ffff".to_string());

        let err = store.update_message(&id, Some("x".to_string())).unwrap_err();
        assert_eq!(err, StoreError::MessageNotFound { id });
    }

    #[test]
    fn list_messages_for_unknown_author_fails() {
        let store = make_store();
        store.create_message(new_message("hello", "Ada"));

        let err = store.list_messages("Trent").unwrap_err();
        assert_eq!(
            err,
            StoreError::AuthorNotFound {
                name: "Trent".to_string()
            }
        );
    }

    #[test]
    fn ada_scenario_end_to_end() {
        let store = make_store();

        let first = store.create_message(NewMessage {
            content: Some("hello".to_string()),
            author_name: "Ada".to_string(),
            author_age: Some(36),
            author_nationality: None,
        });
        assert_eq!(first.content.as_deref(), Some("hello"));
        assert_eq!(first.author.name, "Ada");
        assert_eq!(first.author.age, Some(36));
        assert_eq!(first.author.nationality, None);
        assert_eq!(store.count_authors(), 1);
        assert_eq!(store.count_messages(), 1);

        let second = store.create_message(new_message("world", "Ada"));
        assert_eq!(second.author.id, first.author.id);
        assert_eq!(store.count_authors(), 1);
        assert_eq!(store.count_messages(), 2);

        let contents: Vec<_> = store
            .list_messages("Ada")
            .unwrap()
            .into_iter()
            .map(|m| m.content.unwrap())
            .collect();
        assert_eq!(contents, vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn creation_is_announced_to_prior_subscribers_only() {
        let hub = MessageHub::default();
        let store = MemoryRecordStore::new(hub.clone());

        let mut early = hub.subscribe();
        let first = store.create_message(new_message("hello", "Ada"));
        assert_eq!(early.recv().await, Some(first.clone()));

        // A subscriber registered after the creation sees nothing for it;
        // its first event is the next creation.
        let mut late = hub.subscribe();
        let second = store.create_message(new_message("world", "Ada"));
        assert_eq!(late.recv().await, Some(second.clone()));
        assert_eq!(early.recv().await, Some(second));
    }

    proptest! {
        /// For any sequence of creations, each distinct name maps to exactly
        /// one author record, and each author's index lists their messages
        /// in creation order.
        #[test]
        fn one_author_per_name_and_ordered_listing(
            creations in prop::collection::vec((0usize..4, "[a-z]{1,8}"), 1..40)
        ) {
            let names = ["Ada", "Grace", "Edsger", "Barbara"];
            let store = make_store();
            let mut expected: HashMap<&str, Vec<String>> = HashMap::new();

            for (author_pick, content) in &creations {
                let name = names[*author_pick];
                store.create_message(new_message(content, name));
                expected.entry(name).or_default().push(content.clone());
            }

            prop_assert_eq!(store.count_authors(), expected.len());
            prop_assert_eq!(store.count_messages(), creations.len());

            for (name, contents) in &expected {
                let listed: Vec<_> = store
                    .list_messages(name)
                    .unwrap()
                    .into_iter()
                    .map(|m| m.content.unwrap())
                    .collect();
                prop_assert_eq!(&listed, contents);

                // Every listed message carries the same author id.
                let ids: std::collections::HashSet<_> = store
                    .list_messages(name)
                    .unwrap()
                    .into_iter()
                    .map(|m| m.author.id)
                    .collect();
                prop_assert_eq!(ids.len(), 1);
            }
        }
    }
}
