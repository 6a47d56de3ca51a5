use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::domain::types::{EmailAddress, MemberId, PersonName, TypeConstraintError};

/// A person working in the back-office.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl TeamMember {
    /// Builds a member from raw values, validating each of them.
    pub fn try_new(
        id: i32,
        name: String,
        email: String,
        role: String,
        password_hash: String,
        created_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: MemberId::new(id)?,
            name: PersonName::new(name)?,
            email: EmailAddress::new(email)?,
            role: Role::parse(&role),
            password_hash,
            created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct NewTeamMember {
    pub name: PersonName,
    pub email: EmailAddress,
    pub role: Role,
    pub password_hash: String,
}

impl NewTeamMember {
    #[must_use]
    pub fn new(name: PersonName, email: EmailAddress, role: Role, password_hash: String) -> Self {
        Self {
            name,
            email,
            role,
            password_hash,
        }
    }
}
