//! Route definitions for the `/enrollments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::enrollment;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// ```text
/// GET    /                                                   -> my_courses
/// GET    /{id}/player                                        -> player
/// POST   /{id}/modules/{module_id}/contents/{content_id}/complete -> mark_complete
/// DELETE /{id}/modules/{module_id}/contents/{content_id}/complete -> unmark_complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(enrollment::my_courses))
        .route("/{id}/player", get(enrollment::player))
        .route(
            "/{id}/modules/{module_id}/contents/{content_id}/complete",
            post(enrollment::mark_complete).delete(enrollment::unmark_complete),
        )
}
