//! The acting user as seen by domain logic.
//!
//! The HTTP layer builds an [`Actor`] from the access token (or from the
//! absence of one); everything below it reasons only in these terms.

use crate::roles::{ROLE_INSTRUCTOR, ROLE_STUDENT};
use crate::types::DbId;

/// Platform role of the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Instructor,
    Student,
    Anonymous,
}

impl Role {
    /// Parse a role claim. Unknown names map to [`Role::Anonymous`].
    pub fn from_name(name: &str) -> Self {
        match name {
            ROLE_INSTRUCTOR => Self::Instructor,
            ROLE_STUDENT => Self::Student,
            _ => Self::Anonymous,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Instructor => ROLE_INSTRUCTOR,
            Self::Student => ROLE_STUDENT,
            Self::Anonymous => "anonymous",
        }
    }
}

/// Identity of whoever is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Option<DbId>,
    pub role: Role,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role: Role::Anonymous,
        }
    }

    pub fn user(user_id: DbId, role: Role) -> Self {
        Self {
            user_id: Some(user_id),
            role,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_instructor(&self) -> bool {
        self.is_authenticated() && self.role == Role::Instructor
    }

    pub fn is_student(&self) -> bool {
        self.is_authenticated() && self.role == Role::Student
    }

    /// True iff this actor is the authenticated instructor who owns a course.
    pub fn owns_course(&self, course_instructor_id: DbId) -> bool {
        self.is_instructor() && self.user_id == Some(course_instructor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_known_names() {
        assert_eq!(Role::from_name("instructor"), Role::Instructor);
        assert_eq!(Role::from_name("student"), Role::Student);
        assert_eq!(Role::Instructor.name(), "instructor");
    }

    #[test]
    fn unknown_role_is_anonymous() {
        assert_eq!(Role::from_name("admin"), Role::Anonymous);
        assert_eq!(Role::from_name(""), Role::Anonymous);
    }

    #[test]
    fn owner_must_be_instructor_with_matching_id() {
        assert!(Actor::user(7, Role::Instructor).owns_course(7));
        assert!(!Actor::user(8, Role::Instructor).owns_course(7));
        assert!(!Actor::user(7, Role::Student).owns_course(7));
        assert!(!Actor::anonymous().owns_course(7));
    }

    #[test]
    fn anonymous_is_never_authenticated() {
        let actor = Actor::anonymous();
        assert!(!actor.is_authenticated());
        assert!(!actor.is_instructor());
        assert!(!actor.is_student());
    }
}
