//! Handlers for the `/subjects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use learnhub_db::models::subject::{CreateSubject, Subject, SubjectSummary};

use crate::error::AppResult;
use crate::middleware::rbac::RequireInstructor;
use crate::response::DataResponse;
use crate::services::catalog;
use crate::state::AppState;

/// GET /api/v1/subjects
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SubjectSummary>>>> {
    let subjects = catalog::list_subjects(&*state.store).await?;
    Ok(Json(DataResponse { data: subjects }))
}

/// POST /api/v1/subjects
pub async fn create(
    State(state): State<AppState>,
    RequireInstructor(_user): RequireInstructor,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<DataResponse<Subject>>)> {
    let subject = catalog::create_subject(&*state.store, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}
