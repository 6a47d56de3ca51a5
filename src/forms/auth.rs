use serde::Deserialize;
use validator::Validate;

use crate::domain::types::EmailAddress;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Credentials posted by the sign-in page.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

pub struct LoginPayload {
    pub email: EmailAddress,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            password: form.password,
        })
    }
}
