//! Repository for the `enrollments` and `enrollment_completions` tables.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::Enrollment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, course_id, enrolled_at";

/// Provides enrollment lookup and completion tracking.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll a student, tolerating an existing enrollment.
    ///
    /// Returns the enrollment and whether this call created it.
    pub async fn enroll(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<(Enrollment, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_enrollments_student_course DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(enrollment) => Ok((enrollment, true)),
            None => {
                let existing = Self::find_for(pool, student_id, course_id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the enrollment for a (student, course) pair.
    pub async fn find_for(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// A student's enrollments, most recent first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE student_id = $1
             ORDER BY enrolled_at DESC, id DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    // ── Completion set ───────────────────────────────────────────────

    pub async fn completed_content_ids(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT content_id FROM enrollment_completions
             WHERE enrollment_id = $1 ORDER BY content_id",
        )
        .bind(enrollment_id)
        .fetch_all(pool)
        .await
    }

    /// Add a content to the completion set. Returns `true` if it was not
    /// already present.
    pub async fn mark_complete(
        pool: &PgPool,
        enrollment_id: DbId,
        content_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO enrollment_completions (enrollment_id, content_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(enrollment_id)
        .bind(content_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a content from the completion set. Returns `true` if it was
    /// present.
    pub async fn unmark_complete(
        pool: &PgPool,
        enrollment_id: DbId,
        content_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM enrollment_completions WHERE enrollment_id = $1 AND content_id = $2",
        )
        .bind(enrollment_id)
        .bind(content_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
