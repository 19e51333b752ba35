//! Bulk content reorder within one module.
//!
//! The whole batch is checked against the module's current contents before
//! the store applies it in a single write, so a bad pair leaves every
//! position untouched.

use learnhub_core::error::CoreError;
use learnhub_core::identity::Actor;
use learnhub_core::ordering::{parse_reorder_payload, plan_reorder};
use learnhub_core::types::DbId;
use learnhub_db::store::{ContentStore, CourseStore, EnrollmentStore, ModuleStore};

use super::access::{authorize_owner, Target};
use crate::error::AppResult;

pub const REORDER_SUCCESS_MESSAGE: &str = "Content order updated successfully";

/// Apply a raw `[{"id": .., "order": ..}, ..]` body to `module_id`.
pub async fn reorder_contents<S>(
    store: &S,
    actor: &Actor,
    module_id: DbId,
    body: &[u8],
) -> AppResult<()>
where
    S: CourseStore + ModuleStore + ContentStore + EnrollmentStore + ?Sized,
{
    authorize_owner(store, actor, Target::Module(module_id)).await?;

    let batch = parse_reorder_payload(body)?;
    let existing = store.list_contents(module_id).await?;
    let plan = plan_reorder(&existing, &batch)?;

    if !store.reorder_contents(module_id, &plan).await? {
        // Contents moved or vanished between planning and applying.
        return Err(CoreError::Conflict(format!(
            "Contents of module {module_id} changed during reorder; retry"
        ))
        .into());
    }

    tracing::info!(module_id, items = plan.len(), "Contents reordered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use learnhub_core::content::{ItemInput, TextInput};
    use learnhub_core::identity::Role;
    use learnhub_core::ordering::{INVALID_JSON_MESSAGE, MISSING_FIELD_MESSAGE};
    use learnhub_db::models::content::SaveContent;
    use learnhub_db::models::course::CreateCourse;
    use learnhub_db::models::module::CreateModule;
    use learnhub_db::store::{MemoryStore, SubjectStore};

    use crate::error::AppError;

    const OWNER: DbId = 1;

    struct Fixture {
        store: MemoryStore,
        module_a: DbId,
        module_b: DbId,
        /// Contents of module A at orders 1, 2, 3.
        a: [DbId; 3],
        /// One content in module B.
        b: DbId,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let subject = store.create_subject("Math", "math").await.unwrap();
        let course = store
            .create_course(
                OWNER,
                "algebra",
                &CreateCourse {
                    subject_id: subject.id,
                    title: "Algebra".into(),
                    slug: None,
                    overview: String::new(),
                    price_cents: 0,
                    is_published: true,
                    image: None,
                    tags: vec![],
                },
            )
            .await
            .unwrap();

        let mut module_ids = Vec::new();
        for title in ["A", "B"] {
            let module = store
                .create_module(
                    course.id,
                    &CreateModule {
                        title: title.into(),
                        description: String::new(),
                        sort_order: None,
                    },
                )
                .await
                .unwrap();
            module_ids.push(module.id);
        }

        let mut ids = Vec::new();
        for (module_id, text) in [
            (module_ids[0], "a1"),
            (module_ids[0], "a2"),
            (module_ids[0], "a3"),
            (module_ids[1], "b1"),
        ] {
            let content = store
                .create_content(&SaveContent {
                    module_id,
                    title: text.into(),
                    sort_order: None,
                    item: ItemInput::Text(TextInput { text: text.into() }),
                })
                .await
                .unwrap()
                .unwrap();
            ids.push(content.id);
        }

        Fixture {
            store,
            module_a: module_ids[0],
            module_b: module_ids[1],
            a: [ids[0], ids[1], ids[2]],
            b: ids[3],
        }
    }

    async fn orders(store: &MemoryStore, module_id: DbId) -> Vec<(DbId, i32)> {
        store
            .list_contents(module_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.id, c.sort_order))
            .collect()
    }

    fn owner() -> Actor {
        Actor::user(OWNER, Role::Instructor)
    }

    #[tokio::test]
    async fn swap_is_applied() {
        let f = fixture().await;
        let body = format!(
            r#"[{{"id": {}, "order": 2}}, {{"id": {}, "order": 1}}]"#,
            f.a[0], f.a[1]
        );
        reorder_contents(&f.store, &owner(), f.module_a, body.as_bytes())
            .await
            .unwrap();

        assert_eq!(
            orders(&f.store, f.module_a).await,
            vec![(f.a[1], 1), (f.a[0], 2), (f.a[2], 3)]
        );
    }

    #[tokio::test]
    async fn foreign_content_fails_whole_batch() {
        let f = fixture().await;
        let before = orders(&f.store, f.module_a).await;
        let body = format!(
            r#"[{{"id": {}, "order": 5}}, {{"id": {}, "order": 1}}]"#,
            f.b, f.a[0]
        );

        assert_matches!(
            reorder_contents(&f.store, &owner(), f.module_a, body.as_bytes()).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Content", id })) if id == f.b
        );
        assert_eq!(orders(&f.store, f.module_a).await, before);
        assert_eq!(orders(&f.store, f.module_b).await, vec![(f.b, 1)]);
    }

    #[tokio::test]
    async fn malformed_bodies_are_rejected() {
        let f = fixture().await;
        assert_matches!(
            reorder_contents(&f.store, &owner(), f.module_a, b"not json").await,
            Err(AppError::Core(CoreError::Validation(msg))) if msg == INVALID_JSON_MESSAGE
        );
        assert_matches!(
            reorder_contents(&f.store, &owner(), f.module_a, br#"[{"id": 1}]"#).await,
            Err(AppError::Core(CoreError::Validation(msg))) if msg == MISSING_FIELD_MESSAGE
        );
    }

    #[tokio::test]
    async fn colliding_orders_conflict() {
        let f = fixture().await;
        let body = format!(r#"[{{"id": {}, "order": 3}}]"#, f.a[0]);
        assert_matches!(
            reorder_contents(&f.store, &owner(), f.module_a, body.as_bytes()).await,
            Err(AppError::Core(CoreError::Conflict(_)))
        );
    }

    #[tokio::test]
    async fn stranger_is_denied_before_parsing() {
        let f = fixture().await;
        let stranger = Actor::user(OWNER + 1, Role::Instructor);
        assert_matches!(
            reorder_contents(&f.store, &stranger, f.module_a, b"not json").await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }
}
