//! Module management inside a course.

use learnhub_core::error::CoreError;
use learnhub_core::identity::Actor;
use learnhub_core::types::DbId;
use learnhub_db::models::module::{CreateModule, Module, UpdateModule};
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore};

use super::access::{authorize_owner, Target};
use super::catalog::visible_course;
use super::validate_input;
use crate::error::AppResult;

/// A course's modules in order. Subject to the same visibility rule as the
/// course itself.
pub async fn list_modules<S>(store: &S, actor: &Actor, course_id: DbId) -> AppResult<Vec<Module>>
where
    S: CourseStore + ModuleStore + ?Sized,
{
    let course = visible_course(store, actor, course_id).await?;
    Ok(store.list_modules(course.id).await?)
}

pub async fn create_module<S>(
    store: &S,
    actor: &Actor,
    course_id: DbId,
    input: &CreateModule,
) -> AppResult<Module>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Course(course_id)).await?;
    validate_input(input)?;

    let module = store.create_module(course_id, input).await?;
    tracing::info!(course_id, module_id = module.id, order = module.sort_order, "Module created");
    Ok(module)
}

/// Update a module addressed through its course.
pub async fn update_module<S>(
    store: &S,
    actor: &Actor,
    course_id: DbId,
    module_id: DbId,
    input: &UpdateModule,
) -> AppResult<Module>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Course(course_id)).await?;
    validate_input(input)?;

    let not_found = CoreError::NotFound {
        entity: "Module",
        id: module_id,
    };
    match store.find_module(module_id).await? {
        Some(module) if module.course_id == course_id => {}
        _ => return Err(not_found.into()),
    }

    let module = store
        .update_module(module_id, input)
        .await?
        .ok_or(not_found)?;
    tracing::info!(course_id, module_id, "Module updated");
    Ok(module)
}

pub async fn delete_module<S>(store: &S, actor: &Actor, module_id: DbId) -> AppResult<()>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let course = authorize_owner(store, actor, Target::Module(module_id)).await?;
    if !store.delete_module(module_id).await? {
        return Err(CoreError::NotFound {
            entity: "Module",
            id: module_id,
        }
        .into());
    }
    tracing::info!(course_id = course.id, module_id, "Module deleted");
    Ok(())
}
