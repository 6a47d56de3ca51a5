//! Lead and remark persistence.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::assignment::Assignee;
use crate::domain::lead::{Lead, NewLead, NewRemark, Remark, UpdateLead};
use crate::domain::types::{EmailAddress, LeadId, TypeConstraintError};
use crate::models::lead::{
    Lead as DbLead, NewLead as DbNewLead, NewRemark as DbNewRemark, Remark as DbRemark,
    UpdateLead as DbUpdateLead,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, LeadReader, LeadWriter};

/// Converts lead rows, attaching each lead's remarks newest first.
fn into_leads(conn: &mut SqliteConnection, rows: Vec<DbLead>) -> RepositoryResult<Vec<Lead>> {
    use crate::schema::lead_remarks;

    let remarks = DbRemark::belonging_to(&rows)
        .order(lead_remarks::created_at.desc())
        .then_order_by(lead_remarks::id.desc())
        .select(DbRemark::as_select())
        .load(conn)?
        .grouped_by(&rows);

    rows.into_iter()
        .zip(remarks)
        .map(|(row, remarks)| -> Result<Lead, TypeConstraintError> {
            let mut lead = Lead::try_from(row)?;
            lead.remarks = remarks
                .into_iter()
                .map(Remark::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lead)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(RepositoryError::from)
}

fn into_lead(conn: &mut SqliteConnection, row: DbLead) -> RepositoryResult<Lead> {
    into_leads(conn, vec![row])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .find(id.get())
            .select(DbLead::as_select())
            .first(&mut conn)
            .optional()?;

        lead.map(|row| into_lead(&mut conn, row)).transpose()
    }

    fn list_leads(&self) -> RepositoryResult<Vec<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let rows = leads::table
            .order(leads::created_at.desc())
            .then_order_by(leads::id.desc())
            .select(DbLead::as_select())
            .load(&mut conn)?;

        into_leads(&mut conn, rows)
    }

    fn list_leads_assigned_to(&self, email: &EmailAddress) -> RepositoryResult<Vec<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let rows = leads::table
            .filter(leads::assigned_to_email.eq(email.as_str()))
            .order(leads::created_at.desc())
            .then_order_by(leads::id.desc())
            .select(DbLead::as_select())
            .load(&mut conn)?;

        into_leads(&mut conn, rows)
    }

    fn list_remarks(&self, lead_id: LeadId) -> RepositoryResult<Vec<Remark>> {
        use crate::schema::lead_remarks;

        let mut conn = self.conn()?;
        let rows = lead_remarks::table
            .filter(lead_remarks::lead_id.eq(lead_id.get()))
            .order(lead_remarks::created_at.desc())
            .then_order_by(lead_remarks::id.desc())
            .select(DbRemark::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| Remark::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let insertable = DbNewLead::from_domain(new_lead, Utc::now().naive_utc());

        let row = diesel::insert_into(leads::table)
            .values(&insertable)
            .returning(DbLead::as_returning())
            .get_result(&mut conn)?;

        Lead::try_from(row).map_err(RepositoryError::from)
    }

    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize> {
        use crate::schema::leads;

        if new_leads.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let insertables: Vec<DbNewLead> = new_leads
            .iter()
            .map(|lead| DbNewLead::from_domain(lead, now))
            .collect();

        let affected = diesel::insert_into(leads::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let changes = DbUpdateLead::from_domain(updates, Utc::now().naive_utc());

        let row = diesel::update(leads::table.find(id.get()))
            .set(&changes)
            .returning(DbLead::as_returning())
            .get_result(&mut conn)?;

        into_lead(&mut conn, row)
    }

    fn add_remark(&self, remark: &NewRemark) -> RepositoryResult<Remark> {
        use crate::schema::{lead_remarks, leads};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let insertable = DbNewRemark::from_domain(remark, now);

        let row = conn.transaction::<DbRemark, diesel::result::Error, _>(|conn| {
            let updated = diesel::update(leads::table.find(remark.lead_id.get()))
                .set((
                    leads::status.eq(remark.status.as_str()),
                    leads::updated_at.eq(now),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            diesel::insert_into(lead_remarks::table)
                .values(&insertable)
                .returning(DbRemark::as_returning())
                .get_result(conn)
        })?;

        Remark::try_from(row).map_err(RepositoryError::from)
    }

    fn assign_leads(&self, ids: &[LeadId], assignee: &Assignee) -> RepositoryResult<usize> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let mut raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        raw_ids.sort_unstable();
        raw_ids.dedup();
        let name = assignee.name.as_ref().map(|n| n.as_str());

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let updated = diesel::update(leads::table.filter(leads::id.eq_any(&raw_ids)))
                .set((
                    leads::assigned_to_email.eq(Some(assignee.email.as_str())),
                    leads::assigned_to_name.eq(name),
                    leads::updated_at.eq(now),
                ))
                .execute(conn)?;
            if updated != raw_ids.len() {
                return Err(diesel::result::Error::NotFound);
            }
            Ok(updated)
        })
        .map_err(RepositoryError::from)
    }

    fn delete_lead(&self, id: LeadId) -> RepositoryResult<()> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(leads::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
