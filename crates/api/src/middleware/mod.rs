//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but anonymous when no token is sent.
//! - [`rbac::RequireInstructor`] -- Requires the `instructor` role.
//! - [`rbac::RequireStudent`] -- Requires the `student` role.

pub mod auth;
pub mod rbac;
