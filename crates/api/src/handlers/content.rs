//! Handlers for module contents.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use learnhub_core::types::DbId;
use learnhub_db::models::content::ResolvedContent;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::services::{content, reorder};
use crate::state::AppState;

/// GET /api/v1/modules/{module_id}/contents
pub async fn list_by_module(
    State(state): State<AppState>,
    user: AuthUser,
    Path(module_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ResolvedContent>>>> {
    let items = content::list_contents(&*state.store, &user.actor(), module_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/modules/{module_id}/contents/{kind}
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path((module_id, kind)): Path<(DbId, String)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<DataResponse<ResolvedContent>>)> {
    let created =
        content::create_content(&*state.store, &user.actor(), module_id, &kind, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/modules/{module_id}/contents/{kind}/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((module_id, kind, id)): Path<(DbId, String, DbId)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<ResolvedContent>>> {
    let updated =
        content::update_content(&*state.store, &user.actor(), module_id, id, &kind, body).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/modules/{module_id}/contents/order
///
/// The body is read raw so malformed JSON gets the reorder-specific message
/// instead of the extractor's rejection.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(module_id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    reorder::reorder_contents(&*state.store, &user.actor(), module_id, &body).await?;
    Ok(Json(MessageResponse {
        message: reorder::REORDER_SUCCESS_MESSAGE,
    }))
}

/// GET /api/v1/contents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ResolvedContent>>> {
    let item = content::get_content(&*state.store, &user.actor(), id).await?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/contents/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    content::delete_content(&*state.store, &user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
