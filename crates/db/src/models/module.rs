//! Module entity model and DTOs.

use learnhub_core::ordering::Sequenced;
use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A module row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Sequenced for Module {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> DbId {
        self.course_id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// DTO for creating a module. Omitting `order` appends after the last module.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModule {
    #[validate(length(min = 1, max = 250, message = "Title must be 1-250 characters."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "order")]
    #[validate(range(min = 0, message = "Order cannot be negative."))]
    pub sort_order: Option<i32>,
}

/// DTO for updating a module. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateModule {
    #[validate(length(min = 1, max = 250, message = "Title must be 1-250 characters."))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, alias = "order")]
    #[validate(range(min = 0, message = "Order cannot be negative."))]
    pub sort_order: Option<i32>,
}
