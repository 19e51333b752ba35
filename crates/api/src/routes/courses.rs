//! Route definitions for the `/courses` resource.
//!
//! Also nests course-scoped module routes under `/courses/{id}/modules` and
//! the course chat under `/courses/{id}/chat`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{chat, course, enrollment, module};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// GET    /recommended                    -> recommended
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// DELETE /{id}                           -> delete
/// POST   /{id}/enroll                    -> enroll
///
/// GET    /{id}/modules                   -> module::list_by_course
/// POST   /{id}/modules                   -> module::create
/// PUT    /{id}/modules/{module_id}       -> module::update
///
/// GET    /{id}/chat                      -> chat::room
/// GET    /{id}/chat/messages             -> chat::messages
/// POST   /{id}/chat/messages             -> chat::post_message
/// ```
pub fn router() -> Router<AppState> {
    let module_routes = Router::new()
        .route("/", get(module::list_by_course).post(module::create))
        .route("/{module_id}", put(module::update));

    Router::new()
        .route("/", get(course::list).post(course::create))
        .route("/recommended", get(course::recommended))
        .route(
            "/{id}",
            get(course::get_by_id)
                .put(course::update)
                .delete(course::delete),
        )
        .route("/{id}/enroll", post(enrollment::enroll))
        .route("/{id}/chat", get(chat::room))
        .route(
            "/{id}/chat/messages",
            get(chat::messages).post(chat::post_message),
        )
        .nest("/{id}/modules", module_routes)
}
