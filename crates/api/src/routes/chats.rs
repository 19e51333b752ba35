//! Route definitions for the `/chats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chats`.
///
/// ```text
/// GET    /                               -> my_chats
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(chat::my_chats))
}
