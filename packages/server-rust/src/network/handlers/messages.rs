//! Message CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::messages::{CountResponse, CreateMessageRequest, UpdateMessageRequest};
use scribe_core::{Message, MessageId};

use super::{ApiError, AppState};
use crate::storage::NewMessage;

/// `GET /messages/{id}` -- looks up a single message.
pub async fn get_message_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let message = state.store.get_message(&MessageId(id))?;
    Ok(Json(message))
}

/// `GET /messages/count` -- cardinality of the message table.
pub async fn count_messages_handler(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.store.count_messages() as u64,
    })
}

/// `POST /messages` -- creates a message, creating its author on first
/// reference, and announces it on the push channel.
pub async fn create_message_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> (StatusCode, Json<Message>) {
    let message = state.store.create_message(NewMessage {
        content: request.content,
        author_name: request.author.name,
        author_age: request.author.age,
        author_nationality: request.author.nationality,
    });
    (StatusCode::CREATED, Json(message))
}

/// `PATCH /messages/{id}` -- replaces the content field wholesale.
pub async fn update_message_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMessageRequest>,
) -> Result<Json<Message>, ApiError> {
    let message = state
        .store
        .update_message(&MessageId(id), request.content)?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use scribe_core::messages::AuthorInput;

    use super::super::test_support::test_state;
    use super::*;

    fn create_request(content: &str, name: &str) -> CreateMessageRequest {
        CreateMessageRequest {
            content: Some(content.to_string()),
            author: AuthorInput {
                name: name.to_string(),
                age: None,
                nationality: None,
            },
        }
    }

    #[tokio::test]
    async fn create_returns_201_with_the_new_message() {
        let state = test_state();

        let (status, Json(message)) =
            create_message_handler(State(state), Json(create_request("hello", "Ada"))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(message.content.as_deref(), Some("hello"));
        assert_eq!(message.author.name, "Ada");
    }

    #[tokio::test]
    async fn get_round_trips_a_created_message() {
        let state = test_state();
        let (_, Json(created)) =
            create_message_handler(State(state.clone()), Json(create_request("hello", "Ada")))
                .await;

        let Json(fetched) = get_message_handler(State(state), Path(created.id.0.clone()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_an_api_error() {
        let state = test_state();
        let result = get_message_handler(State(state), Path("ffffffffffffffffffff".into())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn update_changes_content_only() {
        let state = test_state();
        let (_, Json(created)) =
            create_message_handler(State(state.clone()), Json(create_request("before", "Ada")))
                .await;

        let Json(updated) = update_message_handler(
            State(state),
            Path(created.id.0.clone()),
            Json(UpdateMessageRequest {
                content: Some("after".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.content.as_deref(), Some("after"));
        assert_eq!(updated.author, created.author);
    }

    #[tokio::test]
    async fn count_reflects_creations() {
        let state = test_state();
        let Json(count) = count_messages_handler(State(state.clone())).await;
        assert_eq!(count.count, 0);

        create_message_handler(State(state.clone()), Json(create_request("one", "Ada"))).await;
        create_message_handler(State(state.clone()), Json(create_request("two", "Grace"))).await;

        let Json(count) = count_messages_handler(State(state)).await;
        assert_eq!(count.count, 2);
    }
}
