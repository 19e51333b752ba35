//! Enrollment, completion marks and progress.

use learnhub_core::error::CoreError;
use learnhub_core::identity::Actor;
use learnhub_core::progress::percentage;
use learnhub_core::types::DbId;
use learnhub_db::models::course::Course;
use learnhub_db::models::enrollment::Enrollment;
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore};
use serde::Serialize;

use super::access::{authorize_owner, Target};
use crate::error::AppResult;

/// How far an enrollment has got through its course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// In `[0, 100]`.
    pub percentage: f64,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }
}

/// One row of the student's "my courses" list.
#[derive(Debug, Serialize)]
pub struct EnrolledCourse {
    pub enrollment: Enrollment,
    pub course: Course,
    pub progress: Progress,
}

/// Result of marking or unmarking a content item.
#[derive(Debug, Serialize)]
pub struct CompletionOutcome {
    pub content_id: DbId,
    /// Whether the content is complete after the call.
    pub completed: bool,
    /// False when the call found the mark already in the requested state.
    pub changed: bool,
    pub progress: Progress,
}

/// An enrollment as seen by the course's instructor.
#[derive(Debug, Serialize)]
pub struct EnrollmentReport {
    pub enrollment: Enrollment,
    pub completed_content_ids: Vec<DbId>,
    pub progress: Progress,
}

/// Enroll a student in a published course. Returns the enrollment and
/// whether this call created it.
pub async fn enroll<S>(
    store: &S,
    student_id: DbId,
    course_id: DbId,
) -> AppResult<(Enrollment, bool)>
where
    S: CourseStore + EnrollmentStore + ?Sized,
{
    match store.find_course(course_id).await? {
        Some(course) if course.is_published => {}
        _ => {
            return Err(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            }
            .into())
        }
    }

    let (enrollment, created) = store.enroll(student_id, course_id).await?;
    if created {
        tracing::info!(
            user_id = student_id,
            course_id,
            enrollment_id = enrollment.id,
            "Student enrolled"
        );
    } else {
        tracing::debug!(user_id = student_id, course_id, "Student already enrolled");
    }
    Ok((enrollment, created))
}

/// Completed-over-total for one enrollment.
pub async fn progress_for<S>(store: &S, enrollment: &Enrollment) -> AppResult<Progress>
where
    S: ContentStore + EnrollmentStore + ?Sized,
{
    let completed = store.completed_content_ids(enrollment.id).await?.len();
    let total = store.count_course_contents(enrollment.course_id).await?;
    Ok(Progress::new(completed, usize::try_from(total).unwrap_or(0)))
}

/// The student's enrollments, newest first, with course and progress.
pub async fn my_courses<S>(store: &S, student_id: DbId) -> AppResult<Vec<EnrolledCourse>>
where
    S: CourseStore + ContentStore + EnrollmentStore + ?Sized,
{
    let enrollments = store.list_student_enrollments(student_id).await?;
    let mut rows = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let Some(course) = store.find_course(enrollment.course_id).await? else {
            continue;
        };
        let progress = progress_for(store, &enrollment).await?;
        rows.push(EnrolledCourse {
            enrollment,
            course,
            progress,
        });
    }
    Ok(rows)
}

/// Load an enrollment that belongs to `student_id`. Someone else's
/// enrollment is reported as missing.
pub async fn own_enrollment<S>(
    store: &S,
    student_id: DbId,
    enrollment_id: DbId,
) -> AppResult<Enrollment>
where
    S: EnrollmentStore + ?Sized,
{
    store
        .find_enrollment(enrollment_id)
        .await?
        .filter(|e| e.student_id == student_id)
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Enrollment",
                id: enrollment_id,
            }
            .into()
        })
}

/// Mark (`complete = true`) or unmark a content item for the student's own
/// enrollment. Both directions are idempotent.
pub async fn set_completion<S>(
    store: &S,
    student_id: DbId,
    enrollment_id: DbId,
    module_id: DbId,
    content_id: DbId,
    complete: bool,
) -> AppResult<CompletionOutcome>
where
    S: ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let enrollment = own_enrollment(store, student_id, enrollment_id).await?;

    match store.find_module(module_id).await? {
        Some(module) if module.course_id == enrollment.course_id => {}
        _ => {
            return Err(CoreError::NotFound {
                entity: "Module",
                id: module_id,
            }
            .into())
        }
    }
    match store.find_content(content_id).await? {
        Some(content) if content.module_id == module_id => {}
        _ => {
            return Err(CoreError::NotFound {
                entity: "Content",
                id: content_id,
            }
            .into())
        }
    }

    let changed = if complete {
        store.mark_complete(enrollment.id, content_id).await?
    } else {
        store.unmark_complete(enrollment.id, content_id).await?
    };
    if changed {
        tracing::info!(enrollment_id, content_id, complete, "Completion updated");
    } else {
        tracing::debug!(enrollment_id, content_id, complete, "Completion unchanged");
    }

    let progress = progress_for(store, &enrollment).await?;
    Ok(CompletionOutcome {
        content_id,
        completed: complete,
        changed,
        progress,
    })
}

/// A student's progress in one of the actor's own courses.
pub async fn enrollment_report<S>(
    store: &S,
    actor: &Actor,
    enrollment_id: DbId,
) -> AppResult<EnrollmentReport>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Enrollment(enrollment_id)).await?;
    let enrollment = store
        .find_enrollment(enrollment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        })?;
    let completed_content_ids = store.completed_content_ids(enrollment.id).await?;
    let progress = progress_for(store, &enrollment).await?;
    Ok(EnrollmentReport {
        enrollment,
        completed_content_ids,
        progress,
    })
}
