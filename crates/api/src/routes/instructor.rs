//! Route definitions for instructor-only views.

use axum::routing::get;
use axum::Router;

use crate::handlers::{course, enrollment};
use crate::state::AppState;

/// Routes mounted at `/instructor`.
///
/// ```text
/// GET    /courses              -> course::dashboard
/// GET    /enrollments/{id}     -> enrollment::report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(course::dashboard))
        .route("/enrollments/{id}", get(enrollment::report))
}
