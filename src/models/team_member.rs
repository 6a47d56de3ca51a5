use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::team_member::{NewTeamMember as DomainNewTeamMember, TeamMember as DomainTeamMember};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::team_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::team_member::TeamMember`].
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::team_members)]
pub struct NewTeamMember<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
}

impl TryFrom<TeamMember> for DomainTeamMember {
    type Error = TypeConstraintError;

    fn try_from(member: TeamMember) -> Result<Self, Self::Error> {
        DomainTeamMember::try_new(
            member.id,
            member.name,
            member.email,
            member.role,
            member.password_hash,
            member.created_at,
        )
    }
}

impl<'a> From<&'a DomainNewTeamMember> for NewTeamMember<'a> {
    fn from(member: &'a DomainNewTeamMember) -> Self {
        Self {
            name: member.name.as_str(),
            email: member.email.as_str(),
            role: member.role.as_str(),
            password_hash: member.password_hash.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::role::Role;

    #[test]
    fn unknown_roles_survive_the_round_trip() {
        let member = TeamMember {
            id: 3,
            name: "Meera".into(),
            email: "Meera@Example.com".into(),
            role: "Intern".into(),
            password_hash: "hash".into(),
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainTeamMember::try_from(member).expect("valid member");
        assert_eq!(domain.email.as_str(), "meera@example.com");
        assert_eq!(domain.role, Role::Other("Intern".into()));
    }
}
