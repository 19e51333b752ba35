//! Repository for the `courses` table.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, instructor_id, subject_id, title, slug, overview, price_cents, \
    is_published, image, tags, created_at, updated_at";

/// Course columns qualified by the `c` alias, plus the module count.
const SUMMARY_COLUMNS: &str = "c.id, c.instructor_id, c.subject_id, c.title, c.slug, \
    c.overview, c.price_cents, c.is_published, c.image, c.tags, c.created_at, c.updated_at, \
    (SELECT COUNT(*) FROM modules m WHERE m.course_id = c.id) AS num_modules";

/// Provides CRUD and catalog queries for courses.
pub struct CourseRepo;

impl CourseRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new course owned by `instructor_id`.
    ///
    /// `slug` is the resolved slug; `input.slug` is ignored. Tags are stored
    /// as given and should already be normalised.
    pub async fn create(
        pool: &PgPool,
        instructor_id: DbId,
        slug: &str,
        input: &CreateCourse,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (instructor_id, subject_id, title, slug, overview, price_cents,
                 is_published, image, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(instructor_id)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.overview)
            .bind(input.price_cents)
            .bind(input.is_published)
            .bind(&input.image)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                subject_id = COALESCE($2, subject_id),
                title = COALESCE($3, title),
                slug = COALESCE($4, slug),
                overview = COALESCE($5, overview),
                price_cents = COALESCE($6, price_cents),
                is_published = COALESCE($7, is_published),
                image = COALESCE($8, image),
                tags = COALESCE($9, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.overview)
            .bind(input.price_cents)
            .bind(input.is_published)
            .bind(&input.image)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course and, by cascade, its modules, contents and
    /// enrollments. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Catalog queries ──────────────────────────────────────────────

    /// Published courses, newest first, optionally limited to one subject.
    pub async fn list_published(
        pool: &PgPool,
        subject_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM courses c
             WHERE c.is_published AND ($1::BIGINT IS NULL OR c.subject_id = $1)
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CourseSummary>(&query)
            .bind(subject_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every course owned by an instructor, newest first.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM courses c
             WHERE c.instructor_id = $1
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, CourseSummary>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Up to `limit` published courses in random order, skipping `exclude`.
    pub async fn random_published(
        pool: &PgPool,
        exclude: &[DbId],
        limit: i64,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM courses c
             WHERE c.is_published AND NOT (c.id = ANY($1))
             ORDER BY random()
             LIMIT $2"
        );
        sqlx::query_as::<_, CourseSummary>(&query)
            .bind(exclude)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
