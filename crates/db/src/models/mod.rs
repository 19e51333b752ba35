//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod chat;
pub mod content;
pub mod content_item;
pub mod course;
pub mod enrollment;
pub mod module;
pub mod subject;
