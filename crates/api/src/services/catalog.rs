//! Subjects, the public course catalog, and instructor course management.

use learnhub_core::error::CoreError;
use learnhub_core::identity::Actor;
use learnhub_core::slug::resolve_slug;
use learnhub_core::tags::normalize_tags;
use learnhub_core::types::DbId;
use learnhub_db::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};
use learnhub_db::models::enrollment::Enrollment;
use learnhub_db::models::module::Module;
use learnhub_db::models::subject::{CreateSubject, Subject, SubjectSummary};
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore, SubjectStore};
use serde::Serialize;

use super::access::{authorize_owner, Target};
use super::validate_input;
use crate::error::{AppError, AppResult};

/// Course page data.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub subject: Option<Subject>,
    pub modules: Vec<Module>,
    /// The acting student's enrollment, if any.
    pub enrollment: Option<Enrollment>,
    /// True for the owning instructor or an enrolled student.
    pub has_access: bool,
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

pub async fn list_subjects<S>(store: &S) -> AppResult<Vec<SubjectSummary>>
where
    S: SubjectStore + ?Sized,
{
    Ok(store.list_subjects().await?)
}

pub async fn create_subject<S>(store: &S, input: &CreateSubject) -> AppResult<Subject>
where
    S: SubjectStore + ?Sized,
{
    validate_input(input)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
    let subject = store.create_subject(input.name.trim(), &slug).await?;
    tracing::info!(subject_id = subject.id, slug = %subject.slug, "Subject created");
    Ok(subject)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Published courses, newest first, optionally filtered by subject slug.
pub async fn list_courses<S>(
    store: &S,
    subject_slug: Option<&str>,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<CourseSummary>>
where
    S: SubjectStore + CourseStore + ?Sized,
{
    let subject_id = match subject_slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => Some(
            store
                .find_subject_by_slug(slug)
                .await?
                .ok_or_else(|| CoreError::NotFoundByKey {
                    entity: "Subject",
                    key: slug.to_string(),
                })?
                .id,
        ),
        None => None,
    };
    Ok(store.list_published_courses(subject_id, limit, offset).await?)
}

/// Load a course the actor may see. Unpublished courses exist only for
/// their instructor.
pub async fn visible_course<S>(store: &S, actor: &Actor, id: DbId) -> AppResult<Course>
where
    S: CourseStore + ?Sized,
{
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Course", id });
    let course = store.find_course(id).await?.ok_or_else(not_found)?;
    if !course.is_published && !actor.owns_course(course.instructor_id) {
        return Err(not_found());
    }
    Ok(course)
}

pub async fn course_detail<S>(store: &S, actor: &Actor, id: DbId) -> AppResult<CourseDetail>
where
    S: SubjectStore + CourseStore + ModuleStore + EnrollmentStore + ?Sized,
{
    let course = visible_course(store, actor, id).await?;
    let subject = store.find_subject(course.subject_id).await?;
    let modules = store.list_modules(course.id).await?;

    let enrollment = match actor.user_id {
        Some(user_id) if actor.is_student() => store.find_enrollment_for(user_id, course.id).await?,
        _ => None,
    };
    let has_access = actor.owns_course(course.instructor_id) || enrollment.is_some();

    Ok(CourseDetail {
        course,
        subject,
        modules,
        enrollment,
        has_access,
    })
}

/// Random published courses the actor is not already taking.
pub async fn recommendations<S>(
    store: &S,
    actor: &Actor,
    mut exclude: Vec<DbId>,
    limit: i64,
) -> AppResult<Vec<CourseSummary>>
where
    S: CourseStore + EnrollmentStore + ?Sized,
{
    if let Some(student_id) = actor.user_id.filter(|_| actor.is_student()) {
        let enrolled = store.list_student_enrollments(student_id).await?;
        exclude.extend(enrolled.into_iter().map(|e| e.course_id));
    }
    exclude.sort_unstable();
    exclude.dedup();
    Ok(store.random_published_courses(&exclude, limit).await?)
}

// ---------------------------------------------------------------------------
// Instructor course management
// ---------------------------------------------------------------------------

pub async fn instructor_dashboard<S>(
    store: &S,
    instructor_id: DbId,
) -> AppResult<Vec<CourseSummary>>
where
    S: CourseStore + ?Sized,
{
    Ok(store.list_instructor_courses(instructor_id).await?)
}

pub async fn create_course<S>(
    store: &S,
    instructor_id: DbId,
    mut input: CreateCourse,
) -> AppResult<Course>
where
    S: SubjectStore + CourseStore + ?Sized,
{
    validate_input(&input)?;
    require_subject(store, input.subject_id).await?;

    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    input.tags = normalize_tags(&input.tags);

    let course = store.create_course(instructor_id, &slug, &input).await?;
    tracing::info!(
        course_id = course.id,
        user_id = instructor_id,
        slug = %course.slug,
        "Course created"
    );
    Ok(course)
}

pub async fn update_course<S>(
    store: &S,
    actor: &Actor,
    id: DbId,
    mut input: UpdateCourse,
) -> AppResult<Course>
where
    S: SubjectStore + CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let course = authorize_owner(store, actor, Target::Course(id)).await?;
    validate_input(&input)?;

    if let Some(subject_id) = input.subject_id {
        require_subject(store, subject_id).await?;
    }
    if let Some(slug) = input.slug.as_deref() {
        let title = input.title.as_deref().unwrap_or(&course.title);
        input.slug = Some(resolve_slug(Some(slug), title)?);
    }
    if let Some(tags) = input.tags.as_deref() {
        input.tags = Some(normalize_tags(tags));
    }

    let course = store
        .update_course(id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Course", id })?;
    tracing::info!(course_id = id, user_id = ?actor.user_id, "Course updated");
    Ok(course)
}

pub async fn delete_course<S>(store: &S, actor: &Actor, id: DbId) -> AppResult<()>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Course(id)).await?;
    if !store.delete_course(id).await? {
        return Err(CoreError::NotFound { entity: "Course", id }.into());
    }
    tracing::info!(course_id = id, user_id = ?actor.user_id, "Course deleted");
    Ok(())
}

async fn require_subject<S>(store: &S, subject_id: DbId) -> AppResult<Subject>
where
    S: SubjectStore + ?Sized,
{
    store
        .find_subject(subject_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Subject",
                id: subject_id,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use learnhub_core::identity::Role;
    use learnhub_db::store::MemoryStore;

    const OWNER: DbId = 10;
    const STUDENT: DbId = 20;

    fn course_input(subject_id: DbId, title: &str, published: bool) -> CreateCourse {
        CreateCourse {
            subject_id,
            title: title.into(),
            slug: None,
            overview: "Overview".into(),
            price_cents: 0,
            is_published: published,
            image: None,
            tags: vec![],
        }
    }

    async fn subject(store: &MemoryStore, name: &str) -> Subject {
        create_subject(
            store,
            &CreateSubject {
                name: name.into(),
                slug: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn subject_slug_is_derived_from_name() {
        let store = MemoryStore::new();
        let created = subject(&store, "Computer Science").await;
        assert_eq!(created.slug, "computer-science");
    }

    #[tokio::test]
    async fn course_create_derives_slug_and_normalizes_tags() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let mut input = course_input(math.id, "Linear Algebra 101", true);
        input.tags = vec![" Matrices".into(), "matrices".into(), "".into(), "Vectors".into()];

        let course = create_course(&store, OWNER, input).await.unwrap();
        assert_eq!(course.slug, "linear-algebra-101");
        assert_eq!(course.tags, vec!["matrices", "vectors"]);
        assert_eq!(course.instructor_id, OWNER);
    }

    #[tokio::test]
    async fn course_create_rejects_negative_price() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let mut input = course_input(math.id, "Algebra", true);
        input.price_cents = -1;

        assert_matches!(
            create_course(&store, OWNER, input).await,
            Err(AppError::Core(CoreError::InvalidFields(fields)))
                if fields.get("price_cents").is_some()
        );
    }

    #[tokio::test]
    async fn course_create_requires_existing_subject() {
        let store = MemoryStore::new();
        assert_matches!(
            create_course(&store, OWNER, course_input(404, "Algebra", true)).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Subject", id: 404 }))
        );
    }

    #[tokio::test]
    async fn unpublished_course_is_hidden_from_everyone_but_owner() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let draft = create_course(&store, OWNER, course_input(math.id, "Draft", false))
            .await
            .unwrap();

        let owner = Actor::user(OWNER, Role::Instructor);
        let detail = course_detail(&store, &owner, draft.id).await.unwrap();
        assert!(detail.has_access);

        for actor in [
            Actor::anonymous(),
            Actor::user(STUDENT, Role::Student),
            Actor::user(OWNER + 1, Role::Instructor),
        ] {
            assert_matches!(
                course_detail(&store, &actor, draft.id).await,
                Err(AppError::Core(CoreError::NotFound { entity: "Course", .. }))
            );
        }
    }

    #[tokio::test]
    async fn detail_reports_enrollment_for_student() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let course = create_course(&store, OWNER, course_input(math.id, "Algebra", true))
            .await
            .unwrap();
        let student = Actor::user(STUDENT, Role::Student);

        let before = course_detail(&store, &student, course.id).await.unwrap();
        assert!(!before.has_access);
        assert!(before.enrollment.is_none());

        store.enroll(STUDENT, course.id).await.unwrap();
        let after = course_detail(&store, &student, course.id).await.unwrap();
        assert!(after.has_access);
        assert_eq!(after.enrollment.map(|e| e.student_id), Some(STUDENT));
    }

    #[tokio::test]
    async fn listing_filters_by_subject_and_skips_drafts() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let art = subject(&store, "Art").await;
        create_course(&store, OWNER, course_input(math.id, "Algebra", true)).await.unwrap();
        create_course(&store, OWNER, course_input(math.id, "Hidden", false)).await.unwrap();
        create_course(&store, OWNER, course_input(art.id, "Drawing", true)).await.unwrap();

        let all = list_courses(&store, None, 10, 0).await.unwrap();
        assert_eq!(all.len(), 2);

        let maths = list_courses(&store, Some("math"), 10, 0).await.unwrap();
        assert_eq!(maths.len(), 1);
        assert_eq!(maths[0].course.title, "Algebra");

        assert_matches!(
            list_courses(&store, Some("nope"), 10, 0).await,
            Err(AppError::Core(CoreError::NotFoundByKey { entity: "Subject", .. }))
        );
    }

    #[tokio::test]
    async fn recommendations_skip_enrolled_and_excluded() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let mut ids = Vec::new();
        for title in ["A", "B", "C", "D"] {
            let course = create_course(&store, OWNER, course_input(math.id, title, true))
                .await
                .unwrap();
            ids.push(course.id);
        }
        store.enroll(STUDENT, ids[0]).await.unwrap();

        let student = Actor::user(STUDENT, Role::Student);
        let picks = recommendations(&store, &student, vec![ids[1]], 10).await.unwrap();
        let mut picked: Vec<DbId> = picks.iter().map(|c| c.course.id).collect();
        picked.sort_unstable();
        assert_eq!(picked, vec![ids[2], ids[3]]);

        let limited = recommendations(&store, &Actor::anonymous(), vec![], 3).await.unwrap();
        assert_eq!(limited.len(), 3);
    }

    #[tokio::test]
    async fn update_renormalizes_slug_and_requires_owner() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let course = create_course(&store, OWNER, course_input(math.id, "Algebra", true))
            .await
            .unwrap();

        let stranger = Actor::user(OWNER + 1, Role::Instructor);
        assert_matches!(
            update_course(&store, &stranger, course.id, UpdateCourse::default()).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );

        let owner = Actor::user(OWNER, Role::Instructor);
        let input = UpdateCourse {
            slug: Some("Algebra II".into()),
            is_published: Some(false),
            ..Default::default()
        };
        let updated = update_course(&store, &owner, course.id, input).await.unwrap();
        assert_eq!(updated.slug, "algebra-ii");
        assert!(!updated.is_published);
    }

    #[tokio::test]
    async fn delete_removes_course() {
        let store = MemoryStore::new();
        let math = subject(&store, "Math").await;
        let course = create_course(&store, OWNER, course_input(math.id, "Algebra", true))
            .await
            .unwrap();
        let owner = Actor::user(OWNER, Role::Instructor);

        delete_course(&store, &owner, course.id).await.unwrap();
        assert!(store.find_course(course.id).await.unwrap().is_none());
    }
}
