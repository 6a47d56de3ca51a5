use serde::Deserialize;
use validator::Validate;

use crate::domain::role::Role;
use crate::domain::types::{EmailAddress, PersonName};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct AddMemberForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 8))]
    pub password: String,
}

pub struct AddMemberPayload {
    pub name: PersonName,
    pub email: EmailAddress,
    pub role: Role,
    pub password: String,
}

impl TryFrom<AddMemberForm> for AddMemberPayload {
    type Error = FormError;

    fn try_from(form: AddMemberForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: PersonName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            role: Role::parse(&form.role),
            password: form.password,
        })
    }
}
