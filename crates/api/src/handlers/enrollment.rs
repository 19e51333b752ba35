//! Handlers for enrollments, the course player and completion marks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnhub_core::types::DbId;
use learnhub_db::models::enrollment::Enrollment;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::query::PlayerParams;
use crate::response::DataResponse;
use crate::services::enrollment::{self, CompletionOutcome, EnrolledCourse, EnrollmentReport};
use crate::services::player::{self, PlayerView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    /// `"enrolled"` or `"already_enrolled"`.
    pub status: &'static str,
    pub enrollment: Enrollment,
}

/// POST /api/v1/courses/{id}/enroll
///
/// 201 on first enrollment, 200 when the student was already enrolled.
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(course_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<EnrollResponse>>)> {
    let (enrollment, created) =
        enrollment::enroll(&*state.store, user.user_id, course_id).await?;
    let (status, label) = if created {
        (StatusCode::CREATED, "enrolled")
    } else {
        (StatusCode::OK, "already_enrolled")
    };
    Ok((
        status,
        Json(DataResponse {
            data: EnrollResponse {
                status: label,
                enrollment,
            },
        }),
    ))
}

/// GET /api/v1/enrollments
pub async fn my_courses(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
) -> AppResult<Json<DataResponse<Vec<EnrolledCourse>>>> {
    let rows = enrollment::my_courses(&*state.store, user.user_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/enrollments/{id}/player
pub async fn player(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(id): Path<DbId>,
    Query(params): Query<PlayerParams>,
) -> AppResult<Json<DataResponse<PlayerView>>> {
    let view = player::course_player(
        &*state.store,
        user.user_id,
        id,
        params.module_id,
        params.content_id,
    )
    .await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/enrollments/{id}/modules/{module_id}/contents/{content_id}/complete
pub async fn mark_complete(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path((id, module_id, content_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Json<DataResponse<CompletionOutcome>>> {
    let outcome =
        enrollment::set_completion(&*state.store, user.user_id, id, module_id, content_id, true)
            .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// DELETE /api/v1/enrollments/{id}/modules/{module_id}/contents/{content_id}/complete
pub async fn unmark_complete(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path((id, module_id, content_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Json<DataResponse<CompletionOutcome>>> {
    let outcome =
        enrollment::set_completion(&*state.store, user.user_id, id, module_id, content_id, false)
            .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/instructor/enrollments/{id}
pub async fn report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EnrollmentReport>>> {
    let report = enrollment::enrollment_report(&*state.store, &user.actor(), id).await?;
    Ok(Json(DataResponse { data: report }))
}
