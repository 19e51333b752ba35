//! Course player selection: which module and content a student is looking at.
//!
//! Works over collections already loaded for one course; never touches
//! storage.

use crate::error::CoreError;
use crate::ordering::{first_in_sequence, Sequenced};
use crate::types::DbId;

/// Outcome of player selection. Either side is `None` when the course (or
/// the selected module) has nothing to select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub module_id: Option<DbId>,
    pub content_id: Option<DbId>,
}

/// Pick the module and content to show.
///
/// - neither id: first module by order, then its first content
/// - module only: that module, then its first content
/// - both: the content must belong to the module
///
/// `contents` may span every module of the course; only those whose parent
/// is the selected module are considered.
pub fn select_position<M: Sequenced, C: Sequenced>(
    modules: &[M],
    contents: &[C],
    module_id: Option<DbId>,
    content_id: Option<DbId>,
) -> Result<Selection, CoreError> {
    let module = match module_id {
        Some(id) => Some(
            modules
                .iter()
                .find(|m| m.id() == id)
                .ok_or(CoreError::NotFound { entity: "Module", id })?,
        ),
        None if content_id.is_some() => {
            return Err(CoreError::Validation(
                "content_id requires module_id".into(),
            ))
        }
        None => first_in_sequence(modules),
    };

    let Some(module) = module else {
        return Ok(Selection::default());
    };
    let in_module = contents.iter().filter(|c| c.parent_id() == module.id());

    let content = match content_id {
        Some(id) => {
            let found = contents
                .iter()
                .find(|c| c.id() == id && c.parent_id() == module.id())
                .ok_or(CoreError::NotFound { entity: "Content", id })?;
            Some(found)
        }
        None => first_in_sequence(in_module),
    };

    Ok(Selection {
        module_id: Some(module.id()),
        content_id: content.map(Sequenced::id),
    })
}
