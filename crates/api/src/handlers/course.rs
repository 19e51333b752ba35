//! Handlers for the `/courses` resource and the instructor dashboard.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnhub_core::types::DbId;
use learnhub_db::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::RequireInstructor;
use crate::query::{CourseListParams, RecommendationParams};
use crate::response::DataResponse;
use crate::services::catalog::{self, CourseDetail};
use crate::state::AppState;

/// GET /api/v1/courses
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> AppResult<Json<DataResponse<Vec<CourseSummary>>>> {
    let page = params.pagination();
    let courses = catalog::list_courses(
        &*state.store,
        params.subject.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/recommended
pub async fn recommended(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<DataResponse<Vec<CourseSummary>>>> {
    let exclude = params.exclude_ids()?;
    let courses =
        catalog::recommendations(&*state.store, &user.actor(), exclude, params.limit()).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /api/v1/courses
pub async fn create(
    State(state): State<AppState>,
    RequireInstructor(user): RequireInstructor,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    let course = catalog::create_course(&*state.store, user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let detail = catalog::course_detail(&*state.store, &user.actor(), id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = catalog::update_course(&*state.store, &user.actor(), id, input).await?;
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    catalog::delete_course(&*state.store, &user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/instructor/courses
pub async fn dashboard(
    State(state): State<AppState>,
    RequireInstructor(user): RequireInstructor,
) -> AppResult<Json<DataResponse<Vec<CourseSummary>>>> {
    let courses = catalog::instructor_dashboard(&*state.store, user.user_id).await?;
    Ok(Json(DataResponse { data: courses }))
}
