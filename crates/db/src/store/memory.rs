//! In-process [`Store`] used by tests and `STORE_BACKEND=memory`.
//!
//! Mirrors the Postgres schema's behaviour: unique constraints surface as
//! [`StoreError::Conflict`], deletes cascade down the course hierarchy, and
//! multi-row writes are validated before anything is changed, under a
//! single write lock.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use learnhub_core::content::{ContentKind, ItemInput};
use learnhub_core::ordering::{max_sort_order, next_sort_order, sort_sequence, ReorderItem};
use learnhub_core::types::DbId;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use crate::models::chat::{ChatMessage, ChatRoom, NewChatMessage};
use crate::models::content::{Content, SaveContent};
use crate::models::content_item::{
    ContentItem, FileContent, ImageContent, TextContent, VideoContent,
};
use crate::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};
use crate::models::enrollment::Enrollment;
use crate::models::module::{CreateModule, Module, UpdateModule};
use crate::models::subject::{Subject, SubjectSummary};

use super::{
    mismatch_message, ChatStore, ContentStore, CourseStore, EnrollmentStore, ModuleStore, Store,
    StoreError, StoreResult, SubjectStore,
};

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct Tables {
    last_id: DbId,
    subjects: BTreeMap<DbId, Subject>,
    courses: BTreeMap<DbId, Course>,
    modules: BTreeMap<DbId, Module>,
    contents: BTreeMap<DbId, Content>,
    texts: BTreeMap<DbId, TextContent>,
    videos: BTreeMap<DbId, VideoContent>,
    images: BTreeMap<DbId, ImageContent>,
    files: BTreeMap<DbId, FileContent>,
    enrollments: BTreeMap<DbId, Enrollment>,
    /// `(enrollment_id, content_id)` pairs.
    completions: BTreeSet<(DbId, DbId)>,
    chat_rooms: BTreeMap<DbId, ChatRoom>,
    chat_messages: BTreeMap<DbId, ChatMessage>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn summarize(&self, course: &Course) -> CourseSummary {
        let num_modules = self
            .modules
            .values()
            .filter(|m| m.course_id == course.id)
            .count() as i64;
        CourseSummary {
            course: course.clone(),
            num_modules,
        }
    }

    /// Summaries of the matching courses, newest first.
    fn newest_first(&self, keep: impl Fn(&Course) -> bool) -> Vec<CourseSummary> {
        let mut courses: Vec<&Course> = self.courses.values().filter(|&c| keep(c)).collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        courses.into_iter().map(|c| self.summarize(c)).collect()
    }

    fn module_contents(&self, module_id: DbId) -> Vec<Content> {
        let mut contents: Vec<Content> = self
            .contents
            .values()
            .filter(|c| c.module_id == module_id)
            .cloned()
            .collect();
        sort_sequence(&mut contents);
        contents
    }

    /// Whether a content other than `except` already sits at `sort_order`.
    fn order_taken(&self, module_id: DbId, sort_order: i32, except: Option<DbId>) -> bool {
        self.contents.values().any(|c| {
            c.module_id == module_id && c.sort_order == sort_order && Some(c.id) != except
        })
    }

    fn insert_item(&mut self, item: &ItemInput) -> DbId {
        let id = self.next_id();
        let now = Utc::now();
        match item {
            ItemInput::Text(input) => {
                self.texts.insert(
                    id,
                    TextContent {
                        id,
                        text: input.text.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
            ItemInput::Video(input) => {
                self.videos.insert(
                    id,
                    VideoContent {
                        id,
                        url: input.url.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
            ItemInput::Image(input) => {
                self.images.insert(
                    id,
                    ImageContent {
                        id,
                        image: input.image.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
            ItemInput::File(input) => {
                self.files.insert(
                    id,
                    FileContent {
                        id,
                        file: input.file.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        id
    }

    fn has_item(&self, kind: ContentKind, item_id: DbId) -> bool {
        match kind {
            ContentKind::Text => self.texts.contains_key(&item_id),
            ContentKind::Video => self.videos.contains_key(&item_id),
            ContentKind::Image => self.images.contains_key(&item_id),
            ContentKind::File => self.files.contains_key(&item_id),
        }
    }

    /// Overwrite a payload in place. The caller has checked it exists.
    fn update_item(&mut self, item_id: DbId, item: &ItemInput) {
        let now = Utc::now();
        match item {
            ItemInput::Text(input) => {
                if let Some(row) = self.texts.get_mut(&item_id) {
                    row.text = input.text.clone();
                    row.updated_at = now;
                }
            }
            ItemInput::Video(input) => {
                if let Some(row) = self.videos.get_mut(&item_id) {
                    row.url = input.url.clone();
                    row.updated_at = now;
                }
            }
            ItemInput::Image(input) => {
                if let Some(row) = self.images.get_mut(&item_id) {
                    row.image = input.image.clone();
                    row.updated_at = now;
                }
            }
            ItemInput::File(input) => {
                if let Some(row) = self.files.get_mut(&item_id) {
                    row.file = input.file.clone();
                    row.updated_at = now;
                }
            }
        }
    }

    fn find_item(&self, kind: ContentKind, item_id: DbId) -> Option<ContentItem> {
        match kind {
            ContentKind::Text => self.texts.get(&item_id).cloned().map(ContentItem::Text),
            ContentKind::Video => self.videos.get(&item_id).cloned().map(ContentItem::Video),
            ContentKind::Image => self.images.get(&item_id).cloned().map(ContentItem::Image),
            ContentKind::File => self.files.get(&item_id).cloned().map(ContentItem::File),
        }
    }

    // ── Cascades ─────────────────────────────────────────────────────

    fn remove_content(&mut self, id: DbId) -> bool {
        let Some(content) = self.contents.remove(&id) else {
            return false;
        };
        match content.content_kind() {
            Ok(ContentKind::Text) => {
                self.texts.remove(&content.item_id);
            }
            Ok(ContentKind::Video) => {
                self.videos.remove(&content.item_id);
            }
            Ok(ContentKind::Image) => {
                self.images.remove(&content.item_id);
            }
            Ok(ContentKind::File) => {
                self.files.remove(&content.item_id);
            }
            Err(_) => {}
        }
        self.completions.retain(|&(_, content_id)| content_id != id);
        true
    }

    fn remove_module(&mut self, id: DbId) -> bool {
        if self.modules.remove(&id).is_none() {
            return false;
        }
        let content_ids: Vec<DbId> = self
            .contents
            .values()
            .filter(|c| c.module_id == id)
            .map(|c| c.id)
            .collect();
        for content_id in content_ids {
            self.remove_content(content_id);
        }
        true
    }

    fn remove_course(&mut self, id: DbId) -> bool {
        if self.courses.remove(&id).is_none() {
            return false;
        }
        let module_ids: Vec<DbId> = self
            .modules
            .values()
            .filter(|m| m.course_id == id)
            .map(|m| m.id)
            .collect();
        for module_id in module_ids {
            self.remove_module(module_id);
        }
        let enrollment_ids: Vec<DbId> = self
            .enrollments
            .values()
            .filter(|e| e.course_id == id)
            .map(|e| e.id)
            .collect();
        for enrollment_id in enrollment_ids {
            self.enrollments.remove(&enrollment_id);
            self.completions.retain(|&(eid, _)| eid != enrollment_id);
        }
        let room_ids: Vec<DbId> = self
            .chat_rooms
            .values()
            .filter(|r| r.course_id == id)
            .map(|r| r.id)
            .collect();
        for room_id in room_ids {
            self.chat_rooms.remove(&room_id);
            self.chat_messages.retain(|_, m| m.room_id != room_id);
        }
        true
    }

    /// Rooms of the given courses, in the order the course ids are listed.
    fn rooms_of(&self, course_ids: impl IntoIterator<Item = DbId>) -> Vec<ChatRoom> {
        course_ids
            .into_iter()
            .filter_map(|course_id| {
                self.chat_rooms
                    .values()
                    .find(|r| r.course_id == course_id)
                    .cloned()
            })
            .collect()
    }
}

#[async_trait]
impl SubjectStore for MemoryStore {
    async fn list_subjects(&self) -> StoreResult<Vec<SubjectSummary>> {
        let tables = self.tables.read().await;
        let mut subjects: Vec<SubjectSummary> = tables
            .subjects
            .values()
            .map(|s| SubjectSummary {
                id: s.id,
                name: s.name.clone(),
                slug: s.slug.clone(),
                published_courses: tables
                    .courses
                    .values()
                    .filter(|c| c.subject_id == s.id && c.is_published)
                    .count() as i64,
            })
            .collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn find_subject(&self, id: DbId) -> StoreResult<Option<Subject>> {
        Ok(self.tables.read().await.subjects.get(&id).cloned())
    }

    async fn find_subject_by_slug(&self, slug: &str) -> StoreResult<Option<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables.subjects.values().find(|s| s.slug == slug).cloned())
    }

    async fn create_subject(&self, name: &str, slug: &str) -> StoreResult<Subject> {
        let mut tables = self.tables.write().await;
        if tables.subjects.values().any(|s| s.name == name) {
            return Err(StoreError::unique("uq_subjects_name"));
        }
        if tables.subjects.values().any(|s| s.slug == slug) {
            return Err(StoreError::unique("uq_subjects_slug"));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let subject = Subject {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.subjects.insert(id, subject.clone());
        Ok(subject)
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_published_courses(
        &self,
        subject_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<CourseSummary>> {
        let tables = self.tables.read().await;
        let courses = tables.newest_first(|c| {
            c.is_published && subject_id.is_none_or(|sid| c.subject_id == sid)
        });
        Ok(courses
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_instructor_courses(
        &self,
        instructor_id: DbId,
    ) -> StoreResult<Vec<CourseSummary>> {
        let tables = self.tables.read().await;
        Ok(tables.newest_first(|c| c.instructor_id == instructor_id))
    }

    async fn random_published_courses(
        &self,
        exclude: &[DbId],
        limit: i64,
    ) -> StoreResult<Vec<CourseSummary>> {
        let tables = self.tables.read().await;
        let mut courses = tables.newest_first(|c| c.is_published && !exclude.contains(&c.id));
        courses.shuffle(&mut rand::rng());
        courses.truncate(limit.max(0) as usize);
        Ok(courses)
    }

    async fn find_course(&self, id: DbId) -> StoreResult<Option<Course>> {
        Ok(self.tables.read().await.courses.get(&id).cloned())
    }

    async fn create_course(
        &self,
        instructor_id: DbId,
        slug: &str,
        input: &CreateCourse,
    ) -> StoreResult<Course> {
        let mut tables = self.tables.write().await;
        if tables.courses.values().any(|c| c.slug == slug) {
            return Err(StoreError::unique("uq_courses_slug"));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let course = Course {
            id,
            instructor_id,
            subject_id: input.subject_id,
            title: input.title.clone(),
            slug: slug.to_string(),
            overview: input.overview.clone(),
            price_cents: input.price_cents,
            is_published: input.is_published,
            image: input.image.clone(),
            tags: input.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: DbId, input: &UpdateCourse) -> StoreResult<Option<Course>> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = &input.slug {
            if tables.courses.values().any(|c| c.id != id && &c.slug == slug) {
                return Err(StoreError::unique("uq_courses_slug"));
            }
        }
        let Some(course) = tables.courses.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(subject_id) = input.subject_id {
            course.subject_id = subject_id;
        }
        if let Some(title) = &input.title {
            course.title = title.clone();
        }
        if let Some(slug) = &input.slug {
            course.slug = slug.clone();
        }
        if let Some(overview) = &input.overview {
            course.overview = overview.clone();
        }
        if let Some(price_cents) = input.price_cents {
            course.price_cents = price_cents;
        }
        if let Some(is_published) = input.is_published {
            course.is_published = is_published;
        }
        if let Some(image) = &input.image {
            course.image = Some(image.clone());
        }
        if let Some(tags) = &input.tags {
            course.tags = tags.clone();
        }
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_course(id))
    }
}

#[async_trait]
impl ModuleStore for MemoryStore {
    async fn list_modules(&self, course_id: DbId) -> StoreResult<Vec<Module>> {
        let tables = self.tables.read().await;
        let mut modules: Vec<Module> = tables
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        sort_sequence(&mut modules);
        Ok(modules)
    }

    async fn find_module(&self, id: DbId) -> StoreResult<Option<Module>> {
        Ok(self.tables.read().await.modules.get(&id).cloned())
    }

    async fn create_module(&self, course_id: DbId, input: &CreateModule) -> StoreResult<Module> {
        let mut tables = self.tables.write().await;
        let siblings: Vec<&Module> = tables
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .collect();
        if siblings.iter().any(|m| m.title == input.title) {
            return Err(StoreError::unique("uq_modules_course_title"));
        }
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => next_sort_order(max_sort_order(siblings))?,
        };

        let id = tables.next_id();
        let now = Utc::now();
        let module = Module {
            id,
            course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            sort_order,
            created_at: now,
            updated_at: now,
        };
        tables.modules.insert(id, module.clone());
        Ok(module)
    }

    async fn update_module(&self, id: DbId, input: &UpdateModule) -> StoreResult<Option<Module>> {
        let mut tables = self.tables.write().await;
        let Some(course_id) = tables.modules.get(&id).map(|m| m.course_id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            let clash = tables
                .modules
                .values()
                .any(|m| m.course_id == course_id && m.id != id && &m.title == title);
            if clash {
                return Err(StoreError::unique("uq_modules_course_title"));
            }
        }
        let Some(module) = tables.modules.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            module.title = title.clone();
        }
        if let Some(description) = &input.description {
            module.description = description.clone();
        }
        if let Some(sort_order) = input.sort_order {
            module.sort_order = sort_order;
        }
        module.updated_at = Utc::now();
        Ok(Some(module.clone()))
    }

    async fn delete_module(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_module(id))
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_contents(&self, module_id: DbId) -> StoreResult<Vec<Content>> {
        Ok(self.tables.read().await.module_contents(module_id))
    }

    async fn list_course_contents(&self, course_id: DbId) -> StoreResult<Vec<Content>> {
        let tables = self.tables.read().await;
        let mut modules: Vec<&Module> = tables
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .collect();
        modules.sort_by_key(|m| (m.sort_order, m.id));
        Ok(modules
            .into_iter()
            .flat_map(|m| tables.module_contents(m.id))
            .collect())
    }

    async fn count_course_contents(&self, course_id: DbId) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .contents
            .values()
            .filter(|c| {
                tables
                    .modules
                    .get(&c.module_id)
                    .is_some_and(|m| m.course_id == course_id)
            })
            .count();
        Ok(count as i64)
    }

    async fn find_content(&self, id: DbId) -> StoreResult<Option<Content>> {
        Ok(self.tables.read().await.contents.get(&id).cloned())
    }

    async fn find_item(
        &self,
        kind: ContentKind,
        item_id: DbId,
    ) -> StoreResult<Option<ContentItem>> {
        Ok(self.tables.read().await.find_item(kind, item_id))
    }

    async fn create_content(&self, input: &SaveContent) -> StoreResult<Option<Content>> {
        let mut tables = self.tables.write().await;
        if !tables.modules.contains_key(&input.module_id) {
            return Ok(None);
        }
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => next_sort_order(max_sort_order(&tables.module_contents(input.module_id)))?,
        };
        if tables.order_taken(input.module_id, sort_order, None) {
            return Err(StoreError::unique("uq_contents_module_order"));
        }

        let item_id = tables.insert_item(&input.item);
        let id = tables.next_id();
        let now = Utc::now();
        let content = Content {
            id,
            module_id: input.module_id,
            title: input.title.clone(),
            sort_order,
            kind: input.kind().render_key().to_string(),
            item_id,
            created_at: now,
            updated_at: now,
        };
        tables.contents.insert(id, content.clone());
        Ok(Some(content))
    }

    async fn update_content(&self, id: DbId, input: &SaveContent) -> StoreResult<Option<Content>> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.contents.get(&id).cloned() else {
            return Ok(None);
        };
        if existing.module_id != input.module_id || existing.kind != input.kind().render_key() {
            return Err(StoreError::Conflict(mismatch_message(&existing, input)));
        }
        if let Some(order) = input.sort_order {
            if tables.order_taken(existing.module_id, order, Some(id)) {
                return Err(StoreError::unique("uq_contents_module_order"));
            }
        }
        if !tables.has_item(input.kind(), existing.item_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }

        tables.update_item(existing.item_id, &input.item);
        let Some(content) = tables.contents.get_mut(&id) else {
            return Ok(None);
        };
        content.title = input.title.clone();
        if let Some(order) = input.sort_order {
            content.sort_order = order;
        }
        content.updated_at = Utc::now();
        Ok(Some(content.clone()))
    }

    async fn delete_content(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_content(id))
    }

    async fn reorder_contents(&self, module_id: DbId, items: &[ReorderItem]) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let mut positions: HashMap<DbId, i32> = tables
            .contents
            .values()
            .filter(|c| c.module_id == module_id)
            .map(|c| (c.id, c.sort_order))
            .collect();
        for item in items {
            match positions.get_mut(&item.id) {
                Some(position) => *position = item.sort_order,
                None => return Ok(false),
            }
        }
        let distinct: BTreeSet<i32> = positions.values().copied().collect();
        if distinct.len() != positions.len() {
            return Err(StoreError::unique("uq_contents_module_order"));
        }

        let now = Utc::now();
        for item in items {
            if let Some(content) = tables.contents.get_mut(&item.id) {
                content.sort_order = item.sort_order;
                content.updated_at = now;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn enroll(&self, student_id: DbId, course_id: DbId) -> StoreResult<(Enrollment, bool)> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .enrollments
            .values()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned();
        if let Some(enrollment) = existing {
            return Ok((enrollment, false));
        }
        let id = tables.next_id();
        let enrollment = Enrollment {
            id,
            student_id,
            course_id,
            enrolled_at: Utc::now(),
        };
        tables.enrollments.insert(id, enrollment.clone());
        Ok((enrollment, true))
    }

    async fn find_enrollment(&self, id: DbId) -> StoreResult<Option<Enrollment>> {
        Ok(self.tables.read().await.enrollments.get(&id).cloned())
    }

    async fn find_enrollment_for(
        &self,
        student_id: DbId,
        course_id: DbId,
    ) -> StoreResult<Option<Enrollment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .values()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn list_student_enrollments(&self, student_id: DbId) -> StoreResult<Vec<Enrollment>> {
        let tables = self.tables.read().await;
        let mut enrollments: Vec<Enrollment> = tables
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at).then(b.id.cmp(&a.id)));
        Ok(enrollments)
    }

    async fn completed_content_ids(&self, enrollment_id: DbId) -> StoreResult<Vec<DbId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .completions
            .iter()
            .filter(|(eid, _)| *eid == enrollment_id)
            .map(|&(_, content_id)| content_id)
            .collect())
    }

    async fn mark_complete(&self, enrollment_id: DbId, content_id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.completions.insert((enrollment_id, content_id)))
    }

    async fn unmark_complete(&self, enrollment_id: DbId, content_id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.completions.remove(&(enrollment_id, content_id)))
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn get_or_create_room(&self, course_id: DbId) -> StoreResult<ChatRoom> {
        let mut tables = self.tables.write().await;
        if let Some(room) = tables.chat_rooms.values().find(|r| r.course_id == course_id) {
            return Ok(room.clone());
        }
        if !tables.courses.contains_key(&course_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let room = ChatRoom {
            id,
            course_id,
            created_at: now,
            updated_at: now,
        };
        tables.chat_rooms.insert(id, room.clone());
        Ok(room)
    }

    async fn recent_messages(&self, room_id: DbId, limit: i64) -> StoreResult<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<ChatMessage> = tables
            .chat_messages
            .values()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then(a.id.cmp(&b.id)));
        let keep = usize::try_from(limit).unwrap_or(0);
        let skip = messages.len().saturating_sub(keep);
        Ok(messages.split_off(skip))
    }

    async fn post_message(
        &self,
        room_id: DbId,
        message: &NewChatMessage,
    ) -> StoreResult<ChatMessage> {
        let mut tables = self.tables.write().await;
        if !tables.chat_rooms.contains_key(&room_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        let id = tables.next_id();
        let message = ChatMessage {
            id,
            room_id,
            sender_id: message.sender_id,
            sender_name: message.sender_name.clone(),
            content: message.content.clone(),
            sent_at: Utc::now(),
        };
        tables.chat_messages.insert(id, message.clone());
        Ok(message)
    }

    async fn list_instructor_rooms(&self, instructor_id: DbId) -> StoreResult<Vec<ChatRoom>> {
        let tables = self.tables.read().await;
        let courses = tables.newest_first(|c| c.instructor_id == instructor_id);
        Ok(tables.rooms_of(courses.iter().map(|summary| summary.course.id)))
    }

    async fn list_student_rooms(&self, student_id: DbId) -> StoreResult<Vec<ChatRoom>> {
        let tables = self.tables.read().await;
        let mut enrollments: Vec<&Enrollment> = tables
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .collect();
        enrollments.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at).then(b.id.cmp(&a.id)));
        Ok(tables.rooms_of(enrollments.iter().map(|e| e.course_id)))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
