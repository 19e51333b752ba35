//! Framework-free domain logic for the learnhub course platform.
//!
//! Nothing in this crate performs I/O. Persistence lives in `learnhub_db`
//! and HTTP concerns in `learnhub_api`; both lean on the types and rules
//! defined here.

pub mod chat;
pub mod content;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod ordering;
pub mod progress;
pub mod roles;
pub mod slug;
pub mod tags;
pub mod types;
pub mod validation;
