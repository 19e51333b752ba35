pub mod chat;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod module;
pub mod subject;
