//! Sign-in against the team member table.

use crate::forms::auth::{LoginForm, LoginPayload};
use crate::models::auth::AuthenticatedUser;
use crate::repository::TeamReader;
use crate::services::{ServiceError, ServiceResult};

/// Checks the credentials and returns the identity to store in the session.
///
/// Unknown emails and wrong passwords both yield [`ServiceError::Unauthorized`]
/// so the response does not reveal which accounts exist.
pub fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: TeamReader + ?Sized,
{
    let payload = LoginPayload::try_from(form)?;

    let Some(member) = repo.get_member_by_email(&payload.email)? else {
        log::warn!("Sign-in attempt for unknown email {}", payload.email);
        return Err(ServiceError::Unauthorized);
    };

    let valid = bcrypt::verify(&payload.password, &member.password_hash).map_err(|err| {
        log::error!("Failed to verify password of {}: {err}", member.email);
        ServiceError::Internal(err.to_string())
    })?;

    if !valid {
        log::warn!("Wrong password for {}", member.email);
        return Err(ServiceError::Unauthorized);
    }

    Ok(AuthenticatedUser::from_member(&member))
}
