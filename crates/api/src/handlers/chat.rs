//! Handlers for course chat rooms.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use learnhub_core::types::DbId;
use learnhub_db::models::chat::ChatMessage;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::chat::{self, ChatRoomView};
use crate::state::AppState;

/// GET /api/v1/courses/{id}/chat
pub async fn room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChatRoomView>>> {
    let view = chat::open_room(&*state.store, &user.actor(), course_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/courses/{id}/chat/messages
pub async fn messages(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ChatMessage>>>> {
    let messages = chat::room_messages(&*state.store, &user.actor(), course_id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/courses/{id}/chat/messages
///
/// The body is read raw so malformed JSON is reported as a 400 with the
/// chat's own message.
pub async fn post_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<DataResponse<ChatMessage>>)> {
    let message = chat::post_message(
        &*state.store,
        &user.actor(),
        &user.display_name(),
        course_id,
        &body,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/chats
pub async fn my_chats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ChatRoomView>>>> {
    let chats = chat::my_chats(&*state.store, &user.actor()).await?;
    Ok(Json(DataResponse { data: chats }))
}
