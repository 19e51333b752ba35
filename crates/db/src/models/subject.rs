//! Subject entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A subject row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subject with the number of published courses filed under it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub published_courses: i64,
}

/// DTO for creating a new subject. The slug is derived from the name when
/// omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Slug must be at most 200 characters."))]
    pub slug: Option<String>,
}
