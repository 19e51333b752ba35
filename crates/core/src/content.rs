//! Polymorphic content: the closed set of payload kinds a content item can
//! carry, the capability every payload exposes, and input validation for the
//! wrapper and each payload shape.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{check, FieldErrors};

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// Discriminator naming which payload table a content item points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Video,
    Image,
    File,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [Self::Text, Self::Video, Self::Image, Self::File];

    /// Parse a kind from a path segment or stored discriminator.
    ///
    /// Accepts the render key (`"video"`) and the legacy model name
    /// (`"videocontent"`), case-insensitively.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let lowered = name.trim().to_ascii_lowercase();
        let key = lowered.strip_suffix("content").unwrap_or(&lowered);
        match key {
            "text" => Ok(Self::Text),
            "video" => Ok(Self::Video),
            "image" => Ok(Self::Image),
            "file" => Ok(Self::File),
            _ => Err(CoreError::UnknownContentKind(name.to_string())),
        }
    }

    /// Lowercased kind name used to pick presentation logic.
    pub fn render_key(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
            Self::Image => "image",
            Self::File => "file",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Video => "Video",
            Self::Image => "Image",
            Self::File => "File",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.render_key())
    }
}

/// Capability shared by every payload variant.
pub trait ItemPayload {
    /// The kind this payload declares itself to be.
    fn kind(&self) -> ContentKind;

    /// Presentation data handed to the renderer.
    fn render_data(&self) -> serde_json::Value;

    fn render_key(&self) -> &'static str {
        self.kind().render_key()
    }
}

// ---------------------------------------------------------------------------
// Wrapper fields
// ---------------------------------------------------------------------------

/// Title and position supplied for the content wrapper on create or update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct ContentFields {
    #[serde(default)]
    #[validate(length(max = 250, message = "Title must be at most 250 characters."))]
    pub title: String,
    /// `None` on create means "append after the current last item".
    #[serde(default, alias = "order")]
    #[validate(range(min = 0, message = "Order cannot be negative."))]
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Payload inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct TextInput {
    #[validate(length(min = 1, message = "Text must not be empty."))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct VideoInput {
    #[validate(url(message = "Enter a valid video URL."))]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct ImageInput {
    #[validate(length(min = 1, max = 255, message = "Image path must be 1-255 characters."))]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct FileInput {
    #[validate(length(min = 1, max = 255, message = "File path must be 1-255 characters."))]
    pub file: String,
}

/// Validated-shape payload for one of the four kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemInput {
    Text(TextInput),
    Video(VideoInput),
    Image(ImageInput),
    File(FileInput),
}

impl ItemInput {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Text(_) => ContentKind::Text,
            Self::Video(_) => ContentKind::Video,
            Self::Image(_) => ContentKind::Image,
            Self::File(_) => ContentKind::File,
        }
    }

    /// Decode the payload body for `kind`.
    ///
    /// Shape errors (missing field, wrong type) are reported against the
    /// payload's primary field so callers get the same structured feedback
    /// as for rule violations.
    pub fn from_json(kind: ContentKind, value: serde_json::Value) -> Result<Self, FieldErrors> {
        fn decode<T: serde::de::DeserializeOwned>(
            value: serde_json::Value,
            field: &str,
        ) -> Result<T, FieldErrors> {
            serde_json::from_value(value).map_err(|e| {
                let mut errors = FieldErrors::new();
                errors.add(field, e.to_string());
                errors
            })
        }

        match kind {
            ContentKind::Text => decode(value, "text").map(Self::Text),
            ContentKind::Video => decode(value, "url").map(Self::Video),
            ContentKind::Image => decode(value, "image").map(Self::Image),
            ContentKind::File => decode(value, "file").map(Self::File),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::Text(input) => check(input),
            Self::Video(input) => check(input),
            Self::Image(input) => check(input),
            Self::File(input) => check(input),
        }
    }
}

// ---------------------------------------------------------------------------
// Asset path helpers
// ---------------------------------------------------------------------------

/// Last path segment of a stored asset path (`"docs/a/b.pdf"` -> `"b.pdf"`).
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Lowercased extension without the dot, or empty when there is none.
pub fn file_extension(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
