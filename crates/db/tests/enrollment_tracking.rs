//! Integration tests for enrollments and completion marks.

mod common;

use common::{seed, text};
use learnhub_db::repositories::{ContentCreate, ContentRepo, EnrollmentRepo};
use sqlx::PgPool;

const STUDENT_ID: i64 = 42;

// ---------------------------------------------------------------------------
// Test: Enrolling twice returns the same row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_tolerates_existing_enrollment(pool: PgPool) {
    let s = seed(&pool).await;
    let (first, created) = EnrollmentRepo::enroll(&pool, STUDENT_ID, s.course.id)
        .await
        .unwrap();
    assert!(created);

    let (second, created) = EnrollmentRepo::enroll(&pool, STUDENT_ID, s.course.id)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);

    let listed = EnrollmentRepo::list_by_student(&pool, STUDENT_ID).await.unwrap();
    assert_eq!(listed.len(), 1);
    let found = EnrollmentRepo::find_for(&pool, STUDENT_ID, s.course.id)
        .await
        .unwrap();
    assert_eq!(found.map(|e| e.id), Some(first.id));
}

// ---------------------------------------------------------------------------
// Test: Completion marks are idempotent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_completion_marks_are_idempotent(pool: PgPool) {
    let s = seed(&pool).await;
    let content = match ContentRepo::create(&pool, &text(s.module.id, "a", None))
        .await
        .unwrap()
    {
        ContentCreate::Created(content) => content,
        other => panic!("expected content to be created, got {other:?}"),
    };
    let (enrollment, _) = EnrollmentRepo::enroll(&pool, STUDENT_ID, s.course.id)
        .await
        .unwrap();

    assert!(EnrollmentRepo::mark_complete(&pool, enrollment.id, content.id).await.unwrap());
    assert!(!EnrollmentRepo::mark_complete(&pool, enrollment.id, content.id).await.unwrap());
    assert_eq!(
        EnrollmentRepo::completed_content_ids(&pool, enrollment.id)
            .await
            .unwrap(),
        vec![content.id]
    );

    assert!(EnrollmentRepo::unmark_complete(&pool, enrollment.id, content.id).await.unwrap());
    assert!(!EnrollmentRepo::unmark_complete(&pool, enrollment.id, content.id).await.unwrap());
    assert!(EnrollmentRepo::completed_content_ids(&pool, enrollment.id)
        .await
        .unwrap()
        .is_empty());
}
