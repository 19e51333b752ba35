//! [`Store`] backed by PostgreSQL through the repositories.

use async_trait::async_trait;
use learnhub_core::content::ContentKind;
use learnhub_core::ordering::{next_sort_order, ReorderItem};
use learnhub_core::types::DbId;

use crate::models::chat::{ChatMessage, ChatRoom, NewChatMessage};
use crate::models::content::{Content, SaveContent};
use crate::models::content_item::ContentItem;
use crate::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};
use crate::models::enrollment::Enrollment;
use crate::models::module::{CreateModule, Module, UpdateModule};
use crate::models::subject::{Subject, SubjectSummary};
use crate::repositories::{
    ChatRepo, ContentCreate, ContentItemRepo, ContentRepo, ContentUpdate, CourseRepo,
    EnrollmentRepo, ModuleRepo, SubjectRepo,
};
use crate::DbPool;

use super::{
    mismatch_message, ChatStore, ContentStore, CourseStore, EnrollmentStore, ModuleStore, Store,
    StoreError, StoreResult, SubjectStore,
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SubjectStore for PgStore {
    async fn list_subjects(&self) -> StoreResult<Vec<SubjectSummary>> {
        Ok(SubjectRepo::list_with_counts(&self.pool).await?)
    }

    async fn find_subject(&self, id: DbId) -> StoreResult<Option<Subject>> {
        Ok(SubjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_subject_by_slug(&self, slug: &str) -> StoreResult<Option<Subject>> {
        Ok(SubjectRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn create_subject(&self, name: &str, slug: &str) -> StoreResult<Subject> {
        Ok(SubjectRepo::create(&self.pool, name, slug).await?)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_published_courses(
        &self,
        subject_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<CourseSummary>> {
        Ok(CourseRepo::list_published(&self.pool, subject_id, limit, offset).await?)
    }

    async fn list_instructor_courses(
        &self,
        instructor_id: DbId,
    ) -> StoreResult<Vec<CourseSummary>> {
        Ok(CourseRepo::list_by_instructor(&self.pool, instructor_id).await?)
    }

    async fn random_published_courses(
        &self,
        exclude: &[DbId],
        limit: i64,
    ) -> StoreResult<Vec<CourseSummary>> {
        Ok(CourseRepo::random_published(&self.pool, exclude, limit).await?)
    }

    async fn find_course(&self, id: DbId) -> StoreResult<Option<Course>> {
        Ok(CourseRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_course(
        &self,
        instructor_id: DbId,
        slug: &str,
        input: &CreateCourse,
    ) -> StoreResult<Course> {
        Ok(CourseRepo::create(&self.pool, instructor_id, slug, input).await?)
    }

    async fn update_course(&self, id: DbId, input: &UpdateCourse) -> StoreResult<Option<Course>> {
        Ok(CourseRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_course(&self, id: DbId) -> StoreResult<bool> {
        Ok(CourseRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl ModuleStore for PgStore {
    async fn list_modules(&self, course_id: DbId) -> StoreResult<Vec<Module>> {
        Ok(ModuleRepo::list_by_course(&self.pool, course_id).await?)
    }

    async fn find_module(&self, id: DbId) -> StoreResult<Option<Module>> {
        Ok(ModuleRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_module(&self, course_id: DbId, input: &CreateModule) -> StoreResult<Module> {
        // Module positions are not unique, so a concurrent append may share one.
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => next_sort_order(ModuleRepo::max_sort_order(&self.pool, course_id).await?)?,
        };
        Ok(ModuleRepo::create(&self.pool, course_id, input, sort_order).await?)
    }

    async fn update_module(&self, id: DbId, input: &UpdateModule) -> StoreResult<Option<Module>> {
        Ok(ModuleRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_module(&self, id: DbId) -> StoreResult<bool> {
        Ok(ModuleRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list_contents(&self, module_id: DbId) -> StoreResult<Vec<Content>> {
        Ok(ContentRepo::list_by_module(&self.pool, module_id).await?)
    }

    async fn list_course_contents(&self, course_id: DbId) -> StoreResult<Vec<Content>> {
        Ok(ContentRepo::list_by_course(&self.pool, course_id).await?)
    }

    async fn count_course_contents(&self, course_id: DbId) -> StoreResult<i64> {
        Ok(ContentRepo::count_by_course(&self.pool, course_id).await?)
    }

    async fn find_content(&self, id: DbId) -> StoreResult<Option<Content>> {
        Ok(ContentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_item(
        &self,
        kind: ContentKind,
        item_id: DbId,
    ) -> StoreResult<Option<ContentItem>> {
        Ok(ContentItemRepo::find(&self.pool, kind, item_id).await?)
    }

    async fn create_content(&self, input: &SaveContent) -> StoreResult<Option<Content>> {
        match ContentRepo::create(&self.pool, input).await? {
            ContentCreate::Created(content) => Ok(Some(content)),
            ContentCreate::ModuleNotFound => Ok(None),
            ContentCreate::NoPosition(err) => Err(StoreError::Core(err)),
        }
    }

    async fn update_content(&self, id: DbId, input: &SaveContent) -> StoreResult<Option<Content>> {
        match ContentRepo::update(&self.pool, id, input).await? {
            ContentUpdate::Updated(content) => Ok(Some(content)),
            ContentUpdate::NotFound => Ok(None),
            ContentUpdate::Mismatch(existing) => Err(StoreError::Conflict(mismatch_message(
                &existing,
                input,
            ))),
        }
    }

    async fn delete_content(&self, id: DbId) -> StoreResult<bool> {
        Ok(ContentRepo::delete(&self.pool, id).await?)
    }

    async fn reorder_contents(&self, module_id: DbId, items: &[ReorderItem]) -> StoreResult<bool> {
        Ok(ContentRepo::reorder(&self.pool, module_id, items).await?)
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    async fn enroll(&self, student_id: DbId, course_id: DbId) -> StoreResult<(Enrollment, bool)> {
        Ok(EnrollmentRepo::enroll(&self.pool, student_id, course_id).await?)
    }

    async fn find_enrollment(&self, id: DbId) -> StoreResult<Option<Enrollment>> {
        Ok(EnrollmentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_enrollment_for(
        &self,
        student_id: DbId,
        course_id: DbId,
    ) -> StoreResult<Option<Enrollment>> {
        Ok(EnrollmentRepo::find_for(&self.pool, student_id, course_id).await?)
    }

    async fn list_student_enrollments(&self, student_id: DbId) -> StoreResult<Vec<Enrollment>> {
        Ok(EnrollmentRepo::list_by_student(&self.pool, student_id).await?)
    }

    async fn completed_content_ids(&self, enrollment_id: DbId) -> StoreResult<Vec<DbId>> {
        Ok(EnrollmentRepo::completed_content_ids(&self.pool, enrollment_id).await?)
    }

    async fn mark_complete(&self, enrollment_id: DbId, content_id: DbId) -> StoreResult<bool> {
        Ok(EnrollmentRepo::mark_complete(&self.pool, enrollment_id, content_id).await?)
    }

    async fn unmark_complete(&self, enrollment_id: DbId, content_id: DbId) -> StoreResult<bool> {
        Ok(EnrollmentRepo::unmark_complete(&self.pool, enrollment_id, content_id).await?)
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn get_or_create_room(&self, course_id: DbId) -> StoreResult<ChatRoom> {
        Ok(ChatRepo::get_or_create_room(&self.pool, course_id).await?)
    }

    async fn recent_messages(&self, room_id: DbId, limit: i64) -> StoreResult<Vec<ChatMessage>> {
        Ok(ChatRepo::recent_messages(&self.pool, room_id, limit).await?)
    }

    async fn post_message(
        &self,
        room_id: DbId,
        message: &NewChatMessage,
    ) -> StoreResult<ChatMessage> {
        Ok(ChatRepo::insert_message(&self.pool, room_id, message).await?)
    }

    async fn list_instructor_rooms(&self, instructor_id: DbId) -> StoreResult<Vec<ChatRoom>> {
        Ok(ChatRepo::list_for_instructor(&self.pool, instructor_id).await?)
    }

    async fn list_student_rooms(&self, student_id: DbId) -> StoreResult<Vec<ChatRoom>> {
        Ok(ChatRepo::list_for_student(&self.pool, student_id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
