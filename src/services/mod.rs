//! Business workflows invoked by the HTTP handlers.
//!
//! Every service checks the caller's role first, then validates its input and
//! only then touches the repository.

use thiserror::Error;

use crate::domain::role::Role;
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod auth;
pub mod content;
pub mod enrollments;
pub mod files;
pub mod jobs;
pub mod leads;
pub mod mail;
pub mod reports;
pub mod team;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Duplicate(message) => ServiceError::Conflict(message),
            err => ServiceError::Repository(err),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Rejects users whose role is not one of `roles`.
pub fn ensure_role(user: &AuthenticatedUser, roles: &[Role]) -> ServiceResult<()> {
    if user.has_any_role(roles) {
        Ok(())
    } else {
        log::warn!(
            "User {} with role {} was denied access",
            user.email,
            user.role
        );
        Err(ServiceError::Unauthorized)
    }
}

/// Roles allowed to manage marketing content.
pub const CONTENT_ROLES: [Role; 2] = [Role::Admin, Role::Marketing];


#[cfg(test)]
mod tests {
    use super::test_support::user_with_role;
    use super::*;

    #[test]
    fn ensure_role_accepts_listed_roles_only() {
        let user = user_with_role("Marketing");
        assert!(ensure_role(&user, &CONTENT_ROLES).is_ok());
        assert!(matches!(
            ensure_role(&user, &[Role::Admin]),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn duplicates_become_conflicts() {
        let err = RepositoryError::from(diesel::result::Error::NotFound);
        assert!(matches!(ServiceError::from(err), ServiceError::NotFound));

        let unique = RepositoryError::Duplicate("team_members.email".to_string());
        assert!(matches!(ServiceError::from(unique), ServiceError::Conflict(_)));

        let other = RepositoryError::DatabaseError("disk full".to_string());
        assert!(matches!(ServiceError::from(other), ServiceError::Repository(_)));
    }
}
