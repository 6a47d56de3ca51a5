//! Role-gated selection of assignment targets and the assignee value object.

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::domain::team_member::TeamMember;
use crate::domain::types::{EmailAddress, PersonName, TypeConstraintError};

/// Team member responsible for a lead or enrollment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignee {
    pub name: Option<PersonName>,
    pub email: EmailAddress,
}

impl Assignee {
    pub fn try_new(name: Option<String>, email: String) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: name.map(PersonName::new).transpose()?,
            email: EmailAddress::new(email)?,
        })
    }

    /// Label used in tables: the name when known, otherwise the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(|name| name.as_str())
            .unwrap_or(self.email.as_str())
    }
}

impl From<&TeamMember> for Assignee {
    fn from(member: &TeamMember) -> Self {
        Self {
            name: Some(member.name.clone()),
            email: member.email.clone(),
        }
    }
}

/// `assigned_to` as it arrives on the wire: either a bare email or an object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AssigneeInput {
    Email(String),
    Member {
        #[serde(default)]
        name: Option<String>,
        email: String,
    },
}

impl TryFrom<AssigneeInput> for Assignee {
    type Error = TypeConstraintError;

    fn try_from(input: AssigneeInput) -> Result<Self, Self::Error> {
        match input {
            AssigneeInput::Email(email) => Assignee::try_new(None, email),
            AssigneeInput::Member { name, email } => {
                let name = name.filter(|n| !n.trim().is_empty());
                Assignee::try_new(name, email)
            }
        }
    }
}

/// Whether members with this role may hand leads/enrollments to others.
pub fn can_assign(role: &Role) -> bool {
    !matches!(role, Role::Telecaller)
}

/// Returns the members `current_role` may assign work to.
///
/// Admins pick from everyone except other admins, counsellors pick from
/// telecallers and every other role picks from sales. Order is preserved.
pub fn assignable_members<'a>(
    current_role: &Role,
    members: &'a [TeamMember],
) -> Vec<&'a TeamMember> {
    members
        .iter()
        .filter(|member| match current_role {
            Role::Admin => member.role != Role::Admin,
            Role::Counsellor => member.role == Role::Telecaller,
            _ => member.role == Role::Sales,
        })
        .collect()
}
