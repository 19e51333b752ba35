//! Course player: what an enrolled student sees while working through a
//! course.

use learnhub_core::error::CoreError;
use learnhub_core::navigation::select_position;
use learnhub_core::types::DbId;
use learnhub_db::models::content::{Content, ResolvedContent};
use learnhub_db::models::course::Course;
use learnhub_db::models::enrollment::Enrollment;
use learnhub_db::models::module::Module;
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore};
use serde::Serialize;

use super::content::resolve_content;
use super::enrollment::{own_enrollment, Progress};
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct PlayerModule {
    #[serde(flatten)]
    pub module: Module,
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub course: Course,
    pub enrollment: Enrollment,
    pub modules: Vec<PlayerModule>,
    pub selected_module: Option<Module>,
    pub selected_content: Option<ResolvedContent>,
    pub completed_content_ids: Vec<DbId>,
    pub total_contents: usize,
    pub progress: Progress,
}

/// Build the player for the student's own enrollment, positioned at
/// `module_id` / `content_id` or at the start of the course.
pub async fn course_player<S>(
    store: &S,
    student_id: DbId,
    enrollment_id: DbId,
    module_id: Option<DbId>,
    content_id: Option<DbId>,
) -> AppResult<PlayerView>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let enrollment = own_enrollment(store, student_id, enrollment_id).await?;
    let course = store
        .find_course(enrollment.course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: enrollment.course_id,
        })?;

    let modules = store.list_modules(course.id).await?;
    let contents = store.list_course_contents(course.id).await?;
    let selection = select_position(&modules, &contents, module_id, content_id)?;

    let selected_module = selection
        .module_id
        .and_then(|id| modules.iter().find(|m| m.id == id).cloned());
    let selected_content = match selection
        .content_id
        .and_then(|id| contents.iter().find(|c| c.id == id).cloned())
    {
        Some(content) => Some(resolve_content(store, content).await?),
        None => None,
    };

    let completed_content_ids = store.completed_content_ids(enrollment.id).await?;
    let total_contents = contents.len();
    let progress = Progress::new(completed_content_ids.len(), total_contents);

    let modules = modules
        .into_iter()
        .map(|module| {
            let contents = contents
                .iter()
                .filter(|c| c.module_id == module.id)
                .cloned()
                .collect();
            PlayerModule { module, contents }
        })
        .collect();

    Ok(PlayerView {
        course,
        enrollment,
        modules,
        selected_module,
        selected_content,
        completed_content_ids,
        total_contents,
        progress,
    })
}
