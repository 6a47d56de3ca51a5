use diesel::prelude::*;

use crate::domain::team_member::{NewTeamMember, TeamMember};
use crate::domain::types::{EmailAddress, MemberId};
use crate::models::team_member::{NewTeamMember as DbNewTeamMember, TeamMember as DbTeamMember};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TeamReader, TeamWriter};

impl TeamReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<TeamMember>> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let member = team_members::table
            .find(id.get())
            .select(DbTeamMember::as_select())
            .first(&mut conn)
            .optional()?;

        member
            .map(TeamMember::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_member_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<TeamMember>> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let member = team_members::table
            .filter(team_members::email.eq(email.as_str()))
            .select(DbTeamMember::as_select())
            .first(&mut conn)
            .optional()?;

        member
            .map(TeamMember::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_members(&self) -> RepositoryResult<Vec<TeamMember>> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let rows = team_members::table
            .order(team_members::name.asc())
            .then_order_by(team_members::id.asc())
            .select(DbTeamMember::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| TeamMember::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl TeamWriter for DieselRepository {
    fn create_member(&self, new_member: &NewTeamMember) -> RepositoryResult<TeamMember> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let insertable: DbNewTeamMember = new_member.into();

        let row = diesel::insert_into(team_members::table)
            .values(&insertable)
            .returning(DbTeamMember::as_returning())
            .get_result(&mut conn)?;

        TeamMember::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_member(&self, id: MemberId) -> RepositoryResult<()> {
        use crate::schema::team_members;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(team_members::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
