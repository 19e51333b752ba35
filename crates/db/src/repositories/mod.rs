//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Steps that must share a
//! transaction take `&mut PgConnection` instead.

pub mod chat_repo;
pub mod content_item_repo;
pub mod content_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod module_repo;
pub mod subject_repo;

pub use chat_repo::ChatRepo;
pub use content_item_repo::ContentItemRepo;
pub use content_repo::{ContentCreate, ContentRepo, ContentUpdate};
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use module_repo::ModuleRepo;
pub use subject_repo::SubjectRepo;
