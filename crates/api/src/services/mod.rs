//! Domain operations behind the HTTP handlers.
//!
//! Services are generic over the store traits they need, so they run the
//! same against [`learnhub_db::store::PgStore`] and
//! [`learnhub_db::store::MemoryStore`]. Handlers pass `&*state.store`.
//!
//! - [`access`] -- ownership resolution for course, module, content and enrollment ids
//! - [`catalog`] -- subjects, courses, recommendations, instructor dashboard
//! - [`modules`] -- module CRUD inside an owned course
//! - [`content`] -- content create/update/resolve/delete
//! - [`reorder`] -- bulk content reorder
//! - [`enrollment`] -- enroll, my courses, completion marks, progress
//! - [`player`] -- course player view
//! - [`chat`] -- per-course chat rooms

pub mod access;
pub mod catalog;
pub mod chat;
pub mod content;
pub mod enrollment;
pub mod modules;
pub mod player;
pub mod reorder;

use learnhub_core::error::CoreError;
use learnhub_core::validation::check;
use validator::Validate;

/// Run field validation on a request DTO, reporting every failing field.
pub(crate) fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    check(input).map_err(CoreError::InvalidFields)
}
