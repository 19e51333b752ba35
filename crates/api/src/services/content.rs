//! Content items: the create/update transaction, payload resolution and
//! deletion.
//!
//! Request bodies are flat JSON objects carrying the wrapper fields
//! (`title`, `order`) next to the payload fields of the chosen kind
//! (`text`, `url`, `image` or `file`). Both halves are validated together
//! and nothing is written unless both pass.

use learnhub_core::content::{ContentFields, ContentKind, ItemInput, ItemPayload};
use learnhub_core::error::CoreError;
use learnhub_core::identity::Actor;
use learnhub_core::types::DbId;
use learnhub_core::validation::{check, check_all, FieldErrors};
use learnhub_db::models::content::{Content, ResolvedContent, SaveContent};
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore};

use super::access::{authorize_owner, Target};
use crate::error::{AppError, AppResult};

/// Decode and validate a content body for `kind` in `module_id`.
///
/// Every failing field of the wrapper and the payload is reported at once.
pub fn parse_content_body(
    module_id: DbId,
    kind: ContentKind,
    body: serde_json::Value,
) -> Result<SaveContent, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".into(),
        ));
    }

    let fields = serde_json::from_value::<ContentFields>(body.clone()).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.add("order", e.to_string());
        errors
    });
    let item = ItemInput::from_json(kind, body);

    check_all([
        fields.as_ref().map_err(Clone::clone).and_then(check),
        item.as_ref().map_err(Clone::clone).and_then(ItemInput::validate),
    ])?;

    match (fields, item) {
        (Ok(fields), Ok(item)) => Ok(SaveContent {
            module_id,
            title: fields.title,
            sort_order: fields.sort_order,
            item,
        }),
        _ => Err(AppError::InternalError(
            "content body validated but did not decode".into(),
        )),
    }
}

/// Attach the payload a content row points at.
///
/// Fails with 404 for an unrecognised discriminator or a missing payload row.
pub async fn resolve_content<S>(store: &S, content: Content) -> AppResult<ResolvedContent>
where
    S: ContentStore + ?Sized,
{
    let kind = content.content_kind()?;
    let item = store
        .find_item(kind, content.item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Content item",
            id: content.item_id,
        })?;
    if item.kind() != kind {
        return Err(CoreError::Internal(format!(
            "content {} declares {kind} but resolved to {}",
            content.id,
            item.kind()
        ))
        .into());
    }

    Ok(ResolvedContent {
        render_key: item.render_key(),
        render_data: item.render_data(),
        content,
        item,
    })
}

/// Create a content item of `kind_name` at the end of (or at `order` in)
/// an owned module.
pub async fn create_content<S>(
    store: &S,
    actor: &Actor,
    module_id: DbId,
    kind_name: &str,
    body: serde_json::Value,
) -> AppResult<ResolvedContent>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let kind = ContentKind::from_name(kind_name)?;
    authorize_owner(store, actor, Target::Module(module_id)).await?;
    let input = parse_content_body(module_id, kind, body)?;

    let content = store
        .create_content(&input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Module",
            id: module_id,
        })?;
    tracing::info!(
        module_id,
        content_id = content.id,
        kind = %kind,
        order = content.sort_order,
        "Content created"
    );
    resolve_content(store, content).await
}

/// Update a content item and its payload in place. The item must already
/// live in `module_id` and be of `kind_name`, otherwise 409.
pub async fn update_content<S>(
    store: &S,
    actor: &Actor,
    module_id: DbId,
    content_id: DbId,
    kind_name: &str,
    body: serde_json::Value,
) -> AppResult<ResolvedContent>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    let kind = ContentKind::from_name(kind_name)?;
    authorize_owner(store, actor, Target::Module(module_id)).await?;
    let input = parse_content_body(module_id, kind, body)?;

    let content = store
        .update_content(content_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Content",
            id: content_id,
        })?;
    tracing::info!(module_id, content_id, kind = %kind, "Content updated");
    resolve_content(store, content).await
}

pub async fn get_content<S>(
    store: &S,
    actor: &Actor,
    content_id: DbId,
) -> AppResult<ResolvedContent>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Content(content_id)).await?;
    let content = store
        .find_content(content_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Content",
            id: content_id,
        })?;
    resolve_content(store, content).await
}

/// A module's contents in order, each with its payload.
pub async fn list_contents<S>(
    store: &S,
    actor: &Actor,
    module_id: DbId,
) -> AppResult<Vec<ResolvedContent>>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Module(module_id)).await?;
    let contents = store.list_contents(module_id).await?;

    let mut resolved = Vec::with_capacity(contents.len());
    for content in contents {
        resolved.push(resolve_content(store, content).await?);
    }
    Ok(resolved)
}

pub async fn delete_content<S>(store: &S, actor: &Actor, content_id: DbId) -> AppResult<()>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Content(content_id)).await?;
    if !store.delete_content(content_id).await? {
        return Err(CoreError::NotFound {
            entity: "Content",
            id: content_id,
        }
        .into());
    }
    tracing::info!(content_id, "Content deleted");
    Ok(())
}
