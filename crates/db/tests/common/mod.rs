#![allow(dead_code)]

use learnhub_core::content::{ItemInput, TextInput};
use learnhub_core::types::DbId;
use learnhub_db::models::content::SaveContent;
use learnhub_db::models::course::{Course, CreateCourse};
use learnhub_db::models::module::{CreateModule, Module};
use learnhub_db::repositories::{CourseRepo, ModuleRepo, SubjectRepo};
use sqlx::PgPool;

pub const INSTRUCTOR_ID: DbId = 7;

/// A published course with one module.
pub struct Seed {
    pub course: Course,
    pub module: Module,
}

pub async fn seed(pool: &PgPool) -> Seed {
    let subject = SubjectRepo::create(pool, "Programming", "programming")
        .await
        .unwrap();
    let course = CourseRepo::create(
        pool,
        INSTRUCTOR_ID,
        "rust-basics",
        &CreateCourse {
            subject_id: subject.id,
            title: "Rust Basics".into(),
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
    let module = ModuleRepo::create(pool, course.id, &new_module("Ownership"), 1)
        .await
        .unwrap();
    Seed { course, module }
}

pub fn new_module(title: &str) -> CreateModule {
    CreateModule {
        title: title.to_string(),
        description: String::new(),
        sort_order: None,
    }
}

pub fn text(module_id: DbId, body: &str, sort_order: Option<i32>) -> SaveContent {
    SaveContent {
        module_id,
        title: body.to_string(),
        sort_order,
        item: ItemInput::Text(TextInput {
            text: body.to_string(),
        }),
    }
}

/// Number of rows in `table`.
pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
