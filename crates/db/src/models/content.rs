//! Content wrapper model and DTOs.
//!
//! A content row is the ordered slot inside a module. It carries a kind
//! discriminator plus the id of the payload row in that kind's table; see
//! [`crate::models::content_item`] for the payloads themselves.

use learnhub_core::content::{ContentKind, ItemInput};
use learnhub_core::error::CoreError;
use learnhub_core::ordering::Sequenced;
use learnhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::content_item::ContentItem;

/// A content row from the `contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    /// Stored discriminator, one of the [`ContentKind`] render keys.
    pub kind: String,
    pub item_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Content {
    /// Parse the stored discriminator.
    pub fn content_kind(&self) -> Result<ContentKind, CoreError> {
        ContentKind::from_name(&self.kind)
    }
}

impl Sequenced for Content {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> DbId {
        self.module_id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// A content row together with its resolved payload.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedContent {
    #[serde(flatten)]
    pub content: Content,
    pub render_key: &'static str,
    /// Presentation data for the renderer selected by `render_key`.
    pub render_data: serde_json::Value,
    pub item: ContentItem,
}

/// Validated input for creating or updating a content item and its payload.
#[derive(Debug, Clone)]
pub struct SaveContent {
    pub module_id: DbId,
    pub title: String,
    /// On create, `None` appends after the module's last item. On update,
    /// `None` keeps the current position.
    pub sort_order: Option<i32>,
    pub item: ItemInput,
}

impl SaveContent {
    pub fn kind(&self) -> ContentKind {
        self.item.kind()
    }
}
