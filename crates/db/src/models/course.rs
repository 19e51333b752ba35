//! Course entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub instructor_id: DbId,
    pub subject_id: DbId,
    pub title: String,
    pub slug: String,
    pub overview: String,
    /// Price in minor currency units; 0 for free courses.
    pub price_cents: i64,
    pub is_published: bool,
    /// Thumbnail asset path.
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A course as shown in listings, with its module count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub course: Course,
    pub num_modules: i64,
}

/// DTO for creating a new course. The instructor is the acting user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    pub subject_id: DbId,
    #[validate(length(min = 1, max = 250, message = "Title must be 1-250 characters."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 250, message = "Slug must be at most 250 characters."))]
    pub slug: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Price cannot be negative."))]
    pub price_cents: i64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    #[validate(length(max = 255, message = "Image path must be at most 255 characters."))]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourse {
    pub subject_id: Option<DbId>,
    #[validate(length(min = 1, max = 250, message = "Title must be 1-250 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 250, message = "Slug must be at most 250 characters."))]
    pub slug: Option<String>,
    pub overview: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative."))]
    pub price_cents: Option<i64>,
    pub is_published: Option<bool>,
    #[validate(length(max = 255, message = "Image path must be at most 255 characters."))]
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
}
