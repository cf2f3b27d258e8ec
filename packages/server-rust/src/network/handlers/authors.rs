//! Author query handlers.

use axum::extract::{Path, State};
use axum::Json;
use scribe_core::messages::CountResponse;
use scribe_core::{Author, Message};

use super::{ApiError, AppState};

/// `GET /authors` -- every known author, insertion order.
pub async fn list_authors_handler(State(state): State<AppState>) -> Json<Vec<Author>> {
    Json(state.store.list_authors())
}

/// `GET /authors/count` -- cardinality of the author table.
pub async fn count_authors_handler(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.store.count_authors() as u64,
    })
}

/// `GET /authors/{name}/messages` -- the author's messages in creation
/// order.
pub async fn list_author_messages_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.store.list_messages(&name)?;
    Ok(Json(messages))
}
