//! Repository for the four payload tables (`text_contents`,
//! `video_contents`, `image_contents`, `file_contents`).

use learnhub_core::content::{ContentKind, ItemInput};
use learnhub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::content_item::{
    ContentItem, FileContent, ImageContent, TextContent, VideoContent,
};

/// Reads and writes payload rows by kind.
pub struct ContentItemRepo;

impl ContentItemRepo {
    /// Insert a payload row, returning its id.
    pub async fn insert(conn: &mut PgConnection, item: &ItemInput) -> Result<DbId, sqlx::Error> {
        let (query, value) = match item {
            ItemInput::Text(input) => {
                ("INSERT INTO text_contents (text) VALUES ($1) RETURNING id", &input.text)
            }
            ItemInput::Video(input) => {
                ("INSERT INTO video_contents (url) VALUES ($1) RETURNING id", &input.url)
            }
            ItemInput::Image(input) => {
                ("INSERT INTO image_contents (image) VALUES ($1) RETURNING id", &input.image)
            }
            ItemInput::File(input) => {
                ("INSERT INTO file_contents (file) VALUES ($1) RETURNING id", &input.file)
            }
        };
        sqlx::query_scalar::<_, DbId>(query)
            .bind(value)
            .fetch_one(&mut *conn)
            .await
    }

    /// Overwrite the payload row `item_id` of the same kind as `item`.
    /// Returns `true` if the row existed.
    pub async fn update(
        conn: &mut PgConnection,
        item_id: DbId,
        item: &ItemInput,
    ) -> Result<bool, sqlx::Error> {
        let (query, value) = match item {
            ItemInput::Text(input) => {
                ("UPDATE text_contents SET text = $2 WHERE id = $1", &input.text)
            }
            ItemInput::Video(input) => {
                ("UPDATE video_contents SET url = $2 WHERE id = $1", &input.url)
            }
            ItemInput::Image(input) => {
                ("UPDATE image_contents SET image = $2 WHERE id = $1", &input.image)
            }
            ItemInput::File(input) => {
                ("UPDATE file_contents SET file = $2 WHERE id = $1", &input.file)
            }
        };
        let result = sqlx::query(query)
            .bind(item_id)
            .bind(value)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the payload row of `kind` with id `item_id`.
    pub async fn find(
        pool: &PgPool,
        kind: ContentKind,
        item_id: DbId,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let item = match kind {
            ContentKind::Text => sqlx::query_as::<_, TextContent>(
                "SELECT id, text, created_at, updated_at FROM text_contents WHERE id = $1",
            )
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Text),
            ContentKind::Video => sqlx::query_as::<_, VideoContent>(
                "SELECT id, url, created_at, updated_at FROM video_contents WHERE id = $1",
            )
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Video),
            ContentKind::Image => sqlx::query_as::<_, ImageContent>(
                "SELECT id, image, created_at, updated_at FROM image_contents WHERE id = $1",
            )
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Image),
            ContentKind::File => sqlx::query_as::<_, FileContent>(
                "SELECT id, file, created_at, updated_at FROM file_contents WHERE id = $1",
            )
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::File),
        };
        Ok(item)
    }
}
