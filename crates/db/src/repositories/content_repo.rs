//! Repository for the `contents` table.
//!
//! Creating or updating a content item writes the payload row and the
//! wrapper row in one transaction. Deleting the wrapper removes the payload
//! via the `trg_contents_delete_payload` trigger.

use learnhub_core::error::CoreError;
use learnhub_core::ordering::{next_sort_order, ReorderItem};
use learnhub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::content::{Content, SaveContent};
use crate::repositories::ContentItemRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, module_id, title, sort_order, kind, item_id, created_at, updated_at";

/// Outcome of [`ContentRepo::create`].
#[derive(Debug)]
pub enum ContentCreate {
    Created(Content),
    ModuleNotFound,
    /// No position is left after the module's last item; nothing was written.
    NoPosition(CoreError),
}

/// Outcome of [`ContentRepo::update`].
#[derive(Debug)]
pub enum ContentUpdate {
    Updated(Content),
    NotFound,
    /// The stored row belongs to another module or kind; nothing was written.
    Mismatch(Content),
}

/// Provides CRUD and ordering operations for content wrappers.
pub struct ContentRepo;

impl ContentRepo {
    // ── Reads ────────────────────────────────────────────────────────

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a module's contents by position.
    pub async fn list_by_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contents WHERE module_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// List every content of a course, grouped by module in module order.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Content>, sqlx::Error> {
        sqlx::query_as::<_, Content>(
            "SELECT c.id, c.module_id, c.title, c.sort_order, c.kind, c.item_id,
                    c.created_at, c.updated_at
             FROM contents c
             JOIN modules m ON m.id = c.module_id
             WHERE m.course_id = $1
             ORDER BY m.sort_order, m.id, c.sort_order, c.id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Number of content items across all modules of a course.
    pub async fn count_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contents c
             JOIN modules m ON m.id = c.module_id
             WHERE m.course_id = $1",
        )
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create the payload and its wrapper atomically.
    ///
    /// Without an explicit position the item is appended after the module's
    /// current last item.
    pub async fn create(
        pool: &PgPool,
        input: &SaveContent,
    ) -> Result<ContentCreate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_module(&mut tx, input.module_id).await? {
            return Ok(ContentCreate::ModuleNotFound);
        }

        let sort_order = match input.sort_order {
            Some(order) => order,
            None => match next_sort_order(Self::max_sort_order(&mut tx, input.module_id).await?) {
                Ok(order) => order,
                Err(err) => return Ok(ContentCreate::NoPosition(err)),
            },
        };
        let item_id = ContentItemRepo::insert(&mut tx, &input.item).await?;

        let query = format!(
            "INSERT INTO contents (module_id, title, sort_order, kind, item_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let content = sqlx::query_as::<_, Content>(&query)
            .bind(input.module_id)
            .bind(&input.title)
            .bind(sort_order)
            .bind(input.kind().render_key())
            .bind(item_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ContentCreate::Created(content))
    }

    /// Update a payload in place and overwrite the wrapper's title and
    /// (when supplied) position, atomically.
    ///
    /// The stored row must belong to `input.module_id` and be of the same
    /// kind as `input.item`, otherwise [`ContentUpdate::Mismatch`] is
    /// returned and nothing is written.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveContent,
    ) -> Result<ContentUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1 FOR UPDATE");
        let Some(existing) = sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(ContentUpdate::NotFound);
        };

        if existing.module_id != input.module_id || existing.kind != input.kind().render_key() {
            return Ok(ContentUpdate::Mismatch(existing));
        }

        if !ContentItemRepo::update(&mut tx, existing.item_id, &input.item).await? {
            return Err(sqlx::Error::RowNotFound);
        }

        let query = format!(
            "UPDATE contents SET
                title = $2,
                sort_order = COALESCE($3, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let content = sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ContentUpdate::Updated(content))
    }

    /// Delete a content wrapper; the trigger removes its payload in the
    /// same statement. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a pre-validated reorder batch in one transaction.
    ///
    /// Returns `false`, with nothing written, if any id is not in the module.
    /// Position uniqueness is checked at commit.
    pub async fn reorder(
        pool: &PgPool,
        module_id: DbId,
        items: &[ReorderItem],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for item in items {
            let result = sqlx::query(
                "UPDATE contents SET sort_order = $3 WHERE id = $1 AND module_id = $2",
            )
            .bind(item.id)
            .bind(module_id)
            .bind(item.sort_order)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                // Dropping `tx` rolls back the rows already moved.
                tracing::debug!(module_id, content_id = item.id, "Reorder target not in module");
                return Ok(false);
            }
        }

        tx.commit().await?;
        Ok(true)
    }

    // ── Transaction helpers ──────────────────────────────────────────

    /// Lock a module row so concurrent appends see each other's positions.
    /// Returns `false` if the module does not exist.
    async fn lock_module(conn: &mut PgConnection, module_id: DbId) -> Result<bool, sqlx::Error> {
        let row = sqlx::query_scalar::<_, DbId>("SELECT id FROM modules WHERE id = $1 FOR UPDATE")
            .bind(module_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    async fn max_sort_order(
        conn: &mut PgConnection,
        module_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM contents WHERE module_id = $1",
        )
        .bind(module_id)
        .fetch_one(&mut *conn)
        .await
    }
}
