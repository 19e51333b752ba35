//! Handlers for course modules.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use learnhub_core::types::DbId;
use learnhub_db::models::module::{CreateModule, Module, UpdateModule};

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::services::modules;
use crate::state::AppState;

/// GET /api/v1/courses/{course_id}/modules
pub async fn list_by_course(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Module>>>> {
    let items = modules::list_modules(&*state.store, &user.actor(), course_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/courses/{course_id}/modules
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateModule>,
) -> AppResult<(StatusCode, Json<DataResponse<Module>>)> {
    let module = modules::create_module(&*state.store, &user.actor(), course_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: module })))
}

/// PUT /api/v1/courses/{course_id}/modules/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((course_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateModule>,
) -> AppResult<Json<DataResponse<Module>>> {
    let module =
        modules::update_module(&*state.store, &user.actor(), course_id, id, &input).await?;
    Ok(Json(DataResponse { data: module }))
}

/// DELETE /api/v1/modules/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    modules::delete_module(&*state.store, &user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
