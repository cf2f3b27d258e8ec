//! Domain types shared between the store, the facade, and the push channel.
//!
//! Identifiers are opaque hex tokens wrapped in newtypes so author and
//! message namespaces cannot be mixed up at compile time. Both serialize
//! transparently as plain strings on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for an [`Author`].
///
/// Minted once when an author name is first seen; never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub String);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier for a [`Message`].
///
/// Minted per creation; drawn from a namespace independent of [`AuthorId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named entity that writes messages. Identity is keyed by `name`:
/// two creations with the same name resolve to the same author record.
///
/// Authors are never deleted and never mutated after creation, which is
/// why [`Message`] can safely embed a copy.
///
/// `age` and `nationality` serialize as explicit `null` when absent --
/// clients of the push channel rely on all four fields being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique identifier, generated on first use of the name.
    pub id: AuthorId,
    /// Natural key. Required.
    pub name: String,
    /// Optional age.
    pub age: Option<i32>,
    /// Optional nationality.
    pub nationality: Option<String>,
}

/// A piece of content attributed to exactly one [`Author`].
///
/// `content` is the only mutable field; the author reference is fixed at
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier, generated per creation.
    pub id: MessageId,
    /// Optional message body.
    pub content: Option<String>,
    /// The owning author.
    pub author: Author,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Author {
        Author {
            id: AuthorId("a1b2c3d4e5f60718293a".to_string()),
            name: "Ada".to_string(),
            age: Some(36),
            nationality: None,
        }
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = MessageId("00ff".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"00ff\"");

        let back: MessageId = serde_json::from_str("\"00ff\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn author_serializes_absent_fields_as_null() {
        let json = serde_json::to_value(ada()).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["age"], 36);
        // Explicit null, not omitted
        assert!(json["nationality"].is_null());
        assert!(json.as_object().unwrap().contains_key("nationality"));
    }

    #[test]
    fn message_embeds_full_author_object() {
        let message = Message {
            id: MessageId("deadbeef00112233aabb".to_string()),
            content: Some("hello".to_string()),
            author: ada(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["id"], "deadbeef00112233aabb");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["author"]["id"], "a1b2c3d4e5f60718293a");
        assert_eq!(json["author"]["age"], 36);
        assert!(json["author"]["nationality"].is_null());
    }

    #[test]
    fn message_with_no_content_round_trips() {
        let message = Message {
            id: MessageId("00".to_string()),
            content: None,
            author: ada(),
        };

        let json = serde_json::to_string(&message).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
