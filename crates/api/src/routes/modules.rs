//! Route definitions for the `/modules` resource and its contents.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{content, module};
use crate::state::AppState;

/// Routes mounted at `/modules`.
///
/// ```text
/// DELETE /{id}                                  -> module::delete
/// GET    /{id}/contents                         -> content::list_by_module
/// POST   /{id}/contents/order                   -> content::reorder
/// POST   /{id}/contents/{kind}                  -> content::create
/// PUT    /{id}/contents/{kind}/{content_id}     -> content::update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(module::delete))
        .route("/{id}/contents", get(content::list_by_module))
        .route("/{id}/contents/order", post(content::reorder))
        .route("/{id}/contents/{kind}", post(content::create))
        .route("/{id}/contents/{kind}/{content_id}", put(content::update))
}
