//! Store traits: the persistence collaborators handed to domain services.
//!
//! One trait per entity, plus the umbrella [`Store`] that the HTTP layer
//! holds as `Arc<dyn Store>`. [`PgStore`] delegates to the repositories;
//! [`MemoryStore`] keeps everything in process for tests and local runs.

use async_trait::async_trait;
use learnhub_core::content::ContentKind;
use learnhub_core::error::CoreError;
use learnhub_core::ordering::ReorderItem;
use learnhub_core::types::DbId;

use crate::models::chat::{ChatMessage, ChatRoom, NewChatMessage};
use crate::models::content::{Content, SaveContent};
use crate::models::content_item::ContentItem;
use crate::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};
use crate::models::enrollment::Enrollment;
use crate::models::module::{CreateModule, Module, UpdateModule};
use crate::models::subject::{Subject, SubjectSummary};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failure reported by a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule or a module/kind consistency rule would be broken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A domain rule rejected the write before anything was stored.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Conflict worded the same way as a Postgres unique violation.
    pub fn unique(constraint: &str) -> Self {
        Self::Conflict(format!(
            "Duplicate value violates unique constraint: {constraint}"
        ))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// Every subject by name, with published-course counts.
    async fn list_subjects(&self) -> StoreResult<Vec<SubjectSummary>>;
    async fn find_subject(&self, id: DbId) -> StoreResult<Option<Subject>>;
    async fn find_subject_by_slug(&self, slug: &str) -> StoreResult<Option<Subject>>;
    async fn create_subject(&self, name: &str, slug: &str) -> StoreResult<Subject>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Published courses, newest first.
    async fn list_published_courses(
        &self,
        subject_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<CourseSummary>>;
    async fn list_instructor_courses(&self, instructor_id: DbId) -> StoreResult<Vec<CourseSummary>>;
    /// Published courses in random order, skipping `exclude`.
    async fn random_published_courses(
        &self,
        exclude: &[DbId],
        limit: i64,
    ) -> StoreResult<Vec<CourseSummary>>;
    async fn find_course(&self, id: DbId) -> StoreResult<Option<Course>>;
    async fn create_course(
        &self,
        instructor_id: DbId,
        slug: &str,
        input: &CreateCourse,
    ) -> StoreResult<Course>;
    async fn update_course(&self, id: DbId, input: &UpdateCourse) -> StoreResult<Option<Course>>;
    /// Delete a course with everything it owns.
    async fn delete_course(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait ModuleStore: Send + Sync {
    /// A course's modules by `(order, id)`.
    async fn list_modules(&self, course_id: DbId) -> StoreResult<Vec<Module>>;
    async fn find_module(&self, id: DbId) -> StoreResult<Option<Module>>;
    async fn create_module(&self, course_id: DbId, input: &CreateModule) -> StoreResult<Module>;
    async fn update_module(&self, id: DbId, input: &UpdateModule) -> StoreResult<Option<Module>>;
    /// Delete a module with its contents, payloads and completion marks.
    async fn delete_module(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// A module's contents by `(order, id)`.
    async fn list_contents(&self, module_id: DbId) -> StoreResult<Vec<Content>>;
    /// Every content of a course, in module order then content order.
    async fn list_course_contents(&self, course_id: DbId) -> StoreResult<Vec<Content>>;
    async fn count_course_contents(&self, course_id: DbId) -> StoreResult<i64>;
    async fn find_content(&self, id: DbId) -> StoreResult<Option<Content>>;
    /// Load one payload row.
    async fn find_item(&self, kind: ContentKind, item_id: DbId) -> StoreResult<Option<ContentItem>>;
    /// Create payload and wrapper atomically. `None` if the module is gone.
    async fn create_content(&self, input: &SaveContent) -> StoreResult<Option<Content>>;
    /// Update payload and wrapper atomically.
    ///
    /// `None` if the content does not exist; [`StoreError::Conflict`] if it
    /// belongs to another module or kind.
    async fn update_content(&self, id: DbId, input: &SaveContent) -> StoreResult<Option<Content>>;
    /// Delete a wrapper and its payload.
    async fn delete_content(&self, id: DbId) -> StoreResult<bool>;
    /// Apply a reorder batch atomically. `false`, with nothing written, if
    /// an id is not in the module.
    async fn reorder_contents(&self, module_id: DbId, items: &[ReorderItem]) -> StoreResult<bool>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Create the enrollment unless it exists; `true` if this call created it.
    async fn enroll(&self, student_id: DbId, course_id: DbId) -> StoreResult<(Enrollment, bool)>;
    async fn find_enrollment(&self, id: DbId) -> StoreResult<Option<Enrollment>>;
    async fn find_enrollment_for(
        &self,
        student_id: DbId,
        course_id: DbId,
    ) -> StoreResult<Option<Enrollment>>;
    /// A student's enrollments, newest first.
    async fn list_student_enrollments(&self, student_id: DbId) -> StoreResult<Vec<Enrollment>>;
    async fn completed_content_ids(&self, enrollment_id: DbId) -> StoreResult<Vec<DbId>>;
    /// `true` if the content was not already complete.
    async fn mark_complete(&self, enrollment_id: DbId, content_id: DbId) -> StoreResult<bool>;
    /// `true` if the content was complete.
    async fn unmark_complete(&self, enrollment_id: DbId, content_id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// The course's room, created on first use.
    async fn get_or_create_room(&self, course_id: DbId) -> StoreResult<ChatRoom>;
    /// The newest `limit` messages of a room, oldest first.
    async fn recent_messages(&self, room_id: DbId, limit: i64) -> StoreResult<Vec<ChatMessage>>;
    async fn post_message(
        &self,
        room_id: DbId,
        message: &NewChatMessage,
    ) -> StoreResult<ChatMessage>;
    /// Existing rooms of the courses an instructor teaches.
    async fn list_instructor_rooms(&self, instructor_id: DbId) -> StoreResult<Vec<ChatRoom>>;
    /// Existing rooms of the courses a student is enrolled in.
    async fn list_student_rooms(&self, student_id: DbId) -> StoreResult<Vec<ChatRoom>>;
}

/// Every store capability, plus a reachability check.
#[async_trait]
pub trait Store:
    SubjectStore + CourseStore + ModuleStore + ContentStore + EnrollmentStore + ChatStore
{
    async fn health_check(&self) -> StoreResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Message for an update whose target belongs to another module or kind.
fn mismatch_message(existing: &Content, input: &SaveContent) -> String {
    format!(
        "Content {} is a {} item in module {}; request targets a {} item in module {}",
        existing.id,
        existing.kind,
        existing.module_id,
        input.kind(),
        input.module_id
    )
}
