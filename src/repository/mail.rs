use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::mail::{MailRecord, MailStatus, NewMailRecord};
use crate::domain::types::MailRecordId;
use crate::models::mail::{MailRecord as DbMailRecord, NewMailRecord as DbNewMailRecord};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MailReader, MailWriter};

impl MailReader for DieselRepository {
    fn get_mail_record_by_id(&self, id: MailRecordId) -> RepositoryResult<Option<MailRecord>> {
        use crate::schema::mail_records;

        let mut conn = self.conn()?;
        let record = mail_records::table
            .find(id.get())
            .select(DbMailRecord::as_select())
            .first(&mut conn)
            .optional()?;

        record
            .map(MailRecord::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_mail_records(&self) -> RepositoryResult<Vec<MailRecord>> {
        use crate::schema::mail_records;

        let mut conn = self.conn()?;
        let rows = mail_records::table
            .order(mail_records::sent_at.desc())
            .then_order_by(mail_records::id.desc())
            .select(DbMailRecord::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| MailRecord::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl MailWriter for DieselRepository {
    fn create_mail_record(&self, record: &NewMailRecord) -> RepositoryResult<MailRecord> {
        use crate::schema::mail_records;

        let mut conn = self.conn()?;
        let insertable: DbNewMailRecord = record.into();

        let row = diesel::insert_into(mail_records::table)
            .values(&insertable)
            .returning(DbMailRecord::as_returning())
            .get_result(&mut conn)?;

        MailRecord::try_from(row).map_err(RepositoryError::from)
    }

    fn update_mail_status(
        &self,
        id: MailRecordId,
        status: MailStatus,
        opened_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<MailRecord> {
        use crate::schema::mail_records;

        let mut conn = self.conn()?;
        let row = diesel::update(mail_records::table.find(id.get()))
            .set((
                mail_records::status.eq(status.as_str()),
                mail_records::opened_at.eq(opened_at),
            ))
            .returning(DbMailRecord::as_returning())
            .get_result(&mut conn)?;

        MailRecord::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_mail_record(&self, id: MailRecordId) -> RepositoryResult<()> {
        use crate::schema::mail_records;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(mail_records::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
