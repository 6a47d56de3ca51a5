use chrono::Utc;
use diesel::prelude::*;

use crate::domain::assignment::Assignee;
use crate::domain::enrollment::{Enrollment, NewEnrollment};
use crate::domain::types::{EnrollmentId, StatusLabel};
use crate::models::enrollment::{Enrollment as DbEnrollment, NewEnrollment as DbNewEnrollment};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EnrollmentReader, EnrollmentWriter};

impl EnrollmentReader for DieselRepository {
    fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let enrollment = enrollments::table
            .find(id.get())
            .select(DbEnrollment::as_select())
            .first(&mut conn)
            .optional()?;

        enrollment
            .map(Enrollment::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_enrollments(&self) -> RepositoryResult<Vec<Enrollment>> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let rows = enrollments::table
            .order(enrollments::created_at.desc())
            .then_order_by(enrollments::id.desc())
            .select(DbEnrollment::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| Enrollment::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl EnrollmentWriter for DieselRepository {
    fn create_enrollment(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let insertable = DbNewEnrollment::from_domain(new_enrollment, Utc::now().naive_utc());

        let row = diesel::insert_into(enrollments::table)
            .values(&insertable)
            .returning(DbEnrollment::as_returning())
            .get_result(&mut conn)?;

        Enrollment::try_from(row).map_err(RepositoryError::from)
    }

    fn update_enrollment_status(
        &self,
        id: EnrollmentId,
        status: &StatusLabel,
    ) -> RepositoryResult<Enrollment> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let row = diesel::update(enrollments::table.find(id.get()))
            .set((
                enrollments::status.eq(status.as_str()),
                enrollments::updated_at.eq(Utc::now().naive_utc()),
            ))
            .returning(DbEnrollment::as_returning())
            .get_result(&mut conn)?;

        Enrollment::try_from(row).map_err(RepositoryError::from)
    }

    fn assign_enrollment(
        &self,
        id: EnrollmentId,
        assignee: &Assignee,
    ) -> RepositoryResult<Enrollment> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let row = diesel::update(enrollments::table.find(id.get()))
            .set((
                enrollments::assigned_to_email.eq(Some(assignee.email.as_str())),
                enrollments::assigned_to_name.eq(assignee.name.as_ref().map(|n| n.as_str())),
                enrollments::updated_at.eq(Utc::now().naive_utc()),
            ))
            .returning(DbEnrollment::as_returning())
            .get_result(&mut conn)?;

        Enrollment::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_enrollment(&self, id: EnrollmentId) -> RepositoryResult<()> {
        use crate::schema::enrollments;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(enrollments::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
