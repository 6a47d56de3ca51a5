use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::job_listing::{JobListing as DomainJobListing, JobRecord, NewJobListing as DomainNewJobListing};
use crate::domain::types::{JobListingId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::job_listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Job listing row; the record itself is stored as JSON text.
pub struct JobListing {
    pub id: i32,
    pub payload: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::job_listings)]
pub struct NewJobListing<'a> {
    pub payload: String,
    pub created_by: &'a str,
}

impl TryFrom<JobListing> for DomainJobListing {
    type Error = TypeConstraintError;

    fn try_from(listing: JobListing) -> Result<Self, Self::Error> {
        let record: JobRecord = serde_json::from_str(&listing.payload)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("job payload: {e}")))?;
        Ok(Self {
            id: JobListingId::new(listing.id)?,
            record,
            created_by: listing.created_by,
            created_at: listing.created_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewJobListing> for NewJobListing<'a> {
    type Error = TypeConstraintError;

    fn try_from(listing: &'a DomainNewJobListing) -> Result<Self, Self::Error> {
        let payload = serde_json::to_string(&listing.record)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("job payload: {e}")))?;
        Ok(Self {
            payload,
            created_by: listing.created_by.as_str(),
        })
    }
}
