//! Request and response payloads for the HTTP API.

use serde::{Deserialize, Serialize};

/// Author reference carried inside a message creation request.
///
/// `name` is the only required field; deserialization fails when it is
/// missing, which is the full extent of input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    /// Author name (natural key).
    pub name: String,
    /// Optional age, recorded only when the author is first created.
    #[serde(default)]
    pub age: Option<i32>,
    /// Optional nationality, recorded only when the author is first created.
    #[serde(default)]
    pub nationality: Option<String>,
}

/// Body of `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    /// Optional message body.
    #[serde(default)]
    pub content: Option<String>,
    /// The (possibly not yet known) author.
    pub author: AuthorInput,
}

/// Body of `PATCH /messages/{id}`. Replaces the content field wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    /// New content; `null` clears the field.
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of the `/messages/count` and `/authors/count` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    /// Current cardinality of the respective table.
    pub count: u64,
}

/// Top-level error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// The error payload.
    pub error: ErrorDetail,
}

/// Structured error detail, so callers can branch on `kind` instead of
/// parsing interpolated strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Stable machine-readable error kind (e.g. `messageNotFound`).
    pub kind: String,
    /// The identifier or name that failed to resolve.
    pub key: String,
    /// Human-readable description.
    pub message: String,
}
