//! Payload rows for the four content kinds.

use learnhub_core::content::{file_extension, file_name, ContentKind, ItemPayload};
use learnhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `text_contents`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TextContent {
    pub id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `video_contents`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoContent {
    pub id: DbId,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `image_contents`. `image` is an asset path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageContent {
    pub id: DbId,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `file_contents`. `file` is an asset path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileContent {
    pub id: DbId,
    pub file: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FileContent {
    pub fn filename(&self) -> &str {
        file_name(&self.file)
    }

    pub fn file_extension(&self) -> String {
        file_extension(&self.file)
    }
}

impl ItemPayload for TextContent {
    fn kind(&self) -> ContentKind {
        ContentKind::Text
    }

    fn render_data(&self) -> serde_json::Value {
        serde_json::json!({ "text": self.text })
    }
}

impl ItemPayload for VideoContent {
    fn kind(&self) -> ContentKind {
        ContentKind::Video
    }

    fn render_data(&self) -> serde_json::Value {
        serde_json::json!({ "url": self.url })
    }
}

impl ItemPayload for ImageContent {
    fn kind(&self) -> ContentKind {
        ContentKind::Image
    }

    fn render_data(&self) -> serde_json::Value {
        serde_json::json!({ "image": self.image })
    }
}

impl ItemPayload for FileContent {
    fn kind(&self) -> ContentKind {
        ContentKind::File
    }

    fn render_data(&self) -> serde_json::Value {
        serde_json::json!({
            "file": self.file,
            "filename": self.filename(),
            "extension": self.file_extension(),
        })
    }
}

/// A resolved payload of any kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    Text(TextContent),
    Video(VideoContent),
    Image(ImageContent),
    File(FileContent),
}

impl ContentItem {
    pub fn id(&self) -> DbId {
        match self {
            Self::Text(item) => item.id,
            Self::Video(item) => item.id,
            Self::Image(item) => item.id,
            Self::File(item) => item.id,
        }
    }

    fn payload(&self) -> &dyn ItemPayload {
        match self {
            Self::Text(item) => item,
            Self::Video(item) => item,
            Self::Image(item) => item,
            Self::File(item) => item,
        }
    }
}

impl ItemPayload for ContentItem {
    fn kind(&self) -> ContentKind {
        self.payload().kind()
    }

    fn render_data(&self) -> serde_json::Value {
        self.payload().render_data()
    }
}
