//! Ownership resolution.
//!
//! Every authoring operation names one entity by id. [`resolve_course`]
//! walks that id up to the course it belongs to; [`authorize_owner`] grants
//! access only to the authenticated instructor of that course. Any failure
//! along the way, including a missing row, is reported as the same 403.
//!
//! [`authorize_participant`] is the looser check for course chat: the
//! owning instructor or any enrolled student.

use learnhub_core::error::CoreError;
use learnhub_core::identity::Actor;
use learnhub_core::types::DbId;
use learnhub_db::models::course::Course;
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore};

use crate::error::{AppError, AppResult};

/// The identifier a request is scoped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Course(DbId),
    Module(DbId),
    Content(DbId),
    Enrollment(DbId),
}

pub const DENIED_MESSAGE: &str = "You do not have permission to manage this course";
pub const CHAT_DENIED_MESSAGE: &str = "You are not authorized to access this chat room";

/// Walk `target` up to its course. `None` if any link in the chain is missing.
pub async fn resolve_course<S>(store: &S, target: Target) -> AppResult<Option<Course>>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let course_id = match target {
        Target::Course(id) => Some(id),
        Target::Module(id) => store.find_module(id).await?.map(|m| m.course_id),
        Target::Content(id) => match store.find_content(id).await? {
            Some(content) => store.find_module(content.module_id).await?.map(|m| m.course_id),
            None => None,
        },
        Target::Enrollment(id) => store.find_enrollment(id).await?.map(|e| e.course_id),
    };

    match course_id {
        Some(id) => Ok(store.find_course(id).await?),
        None => Ok(None),
    }
}

/// Return the course `target` belongs to if `actor` is its instructor.
pub async fn authorize_owner<S>(store: &S, actor: &Actor, target: Target) -> AppResult<Course>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    if actor.is_instructor() {
        if let Some(course) = resolve_course(store, target).await? {
            if actor.owns_course(course.instructor_id) {
                return Ok(course);
            }
        }
    }

    tracing::warn!(
        ?target,
        user_id = ?actor.user_id,
        role = actor.role.name(),
        "Ownership check denied"
    );
    Err(AppError::Core(CoreError::Forbidden(DENIED_MESSAGE.into())))
}

/// Return the course if `actor` teaches it or is enrolled in it.
///
/// Unlike [`authorize_owner`], a missing course is reported as 404.
pub async fn authorize_participant<S>(
    store: &S,
    actor: &Actor,
    course_id: DbId,
) -> AppResult<Course>
where
    S: CourseStore + EnrollmentStore + ?Sized,
{
    let course = store
        .find_course(course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;

    let allowed = match actor.user_id {
        Some(_) if actor.is_instructor() => actor.owns_course(course.instructor_id),
        Some(user_id) if actor.is_student() => store
            .find_enrollment_for(user_id, course_id)
            .await?
            .is_some(),
        _ => false,
    };
    if allowed {
        return Ok(course);
    }

    tracing::warn!(
        course_id,
        user_id = ?actor.user_id,
        role = actor.role.name(),
        "Chat access denied"
    );
    Err(AppError::Core(CoreError::Forbidden(CHAT_DENIED_MESSAGE.into())))
}
