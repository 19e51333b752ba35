pub mod chats;
pub mod contents;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod instructor;
pub mod modules;
pub mod subjects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /subjects                                         list, create (instructor)
///
/// /courses                                          published catalog, create (instructor)
/// /courses/recommended                              random published courses
/// /courses/{id}                                     detail, update, delete (owner)
/// /courses/{id}/enroll                              enroll (student)
/// /courses/{id}/modules                             list, create (owner)
/// /courses/{id}/modules/{module_id}                 update (owner)
/// /courses/{id}/chat                                open room (owner, enrolled student)
/// /courses/{id}/chat/messages                       latest 50, post (owner, enrolled student)
///
/// /modules/{id}                                     delete (owner)
/// /modules/{id}/contents                            list resolved contents (owner)
/// /modules/{id}/contents/order                      bulk reorder (owner)
/// /modules/{id}/contents/{kind}                     create content (owner)
/// /modules/{id}/contents/{kind}/{content_id}        update content (owner)
///
/// /contents/{id}                                    get resolved, delete (owner)
///
/// /instructor/courses                               dashboard (instructor)
/// /instructor/enrollments/{id}                      enrollment progress (owner)
///
/// /enrollments                                      my courses (student)
/// /enrollments/{id}/player                          course player (student)
/// /enrollments/{id}/modules/{module_id}/contents/{content_id}/complete
///                                                   mark, unmark (student)
///
/// /chats                                            my chat rooms (instructor, student)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/subjects", subjects::router())
        .nest("/courses", courses::router())
        .nest("/modules", modules::router())
        .nest("/contents", contents::router())
        .nest("/instructor", instructor::router())
        .nest("/enrollments", enrollments::router())
        .nest("/chats", chats::router())
}
