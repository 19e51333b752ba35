//! Shared query parameter types for API handlers.

use learnhub_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_RECOMMENDATIONS: i64 = 3;
pub const MAX_RECOMMENDATIONS: i64 = 20;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Limit clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query for `GET /courses`.
#[derive(Debug, Default, Deserialize)]
pub struct CourseListParams {
    /// Subject slug filter.
    pub subject: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CourseListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Query for `GET /courses/recommended`.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<i64>,
    /// Comma-separated course ids to leave out.
    pub exclude: Option<String>,
}

impl RecommendationParams {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_RECOMMENDATIONS, MAX_RECOMMENDATIONS)
    }

    /// Parse `exclude`. Blank entries are ignored; anything else that is not
    /// an id is rejected.
    pub fn exclude_ids(&self) -> Result<Vec<DbId>, AppError> {
        let Some(raw) = self.exclude.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<DbId>().map_err(|_| {
                    AppError::BadRequest(format!("Invalid course id in exclude: '{s}'"))
                })
            })
            .collect()
    }
}

/// Query for the course player.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerParams {
    pub module_id: Option<DbId>,
    pub content_id: Option<DbId>,
}

pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}
