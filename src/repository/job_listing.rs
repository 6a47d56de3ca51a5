use diesel::prelude::*;

use crate::domain::job_listing::{JobListing, NewJobListing};
use crate::domain::types::JobListingId;
use crate::models::job_listing::{JobListing as DbJobListing, NewJobListing as DbNewJobListing};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, JobListingReader, JobListingWriter};

impl JobListingReader for DieselRepository {
    fn list_job_listings(&self) -> RepositoryResult<Vec<JobListing>> {
        use crate::schema::job_listings;

        let mut conn = self.conn()?;
        let rows = job_listings::table
            .order(job_listings::created_at.desc())
            .then_order_by(job_listings::id.desc())
            .select(DbJobListing::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| JobListing::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl JobListingWriter for DieselRepository {
    fn create_job_listings(&self, listings: &[NewJobListing]) -> RepositoryResult<usize> {
        use crate::schema::job_listings;

        if listings.is_empty() {
            return Ok(0);
        }

        let insertables = listings
            .iter()
            .map(DbNewJobListing::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.conn()?;
        let affected = diesel::insert_into(job_listings::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_job_listing(&self, id: JobListingId) -> RepositoryResult<()> {
        use crate::schema::job_listings;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(job_listings::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
