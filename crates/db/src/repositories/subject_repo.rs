//! Repository for the `subjects` table.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::subject::{Subject, SubjectSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides lookup and creation for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject with an already-resolved slug.
    pub async fn create(pool: &PgPool, name: &str, slug: &str) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE slug = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every subject by name, each with its count of published courses.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<SubjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, SubjectSummary>(
            "SELECT s.id, s.name, s.slug,
                    COUNT(c.id) FILTER (WHERE c.is_published) AS published_courses
             FROM subjects s
             LEFT JOIN courses c ON c.subject_id = s.id
             GROUP BY s.id
             ORDER BY s.name",
        )
        .fetch_all(pool)
        .await
    }
}
