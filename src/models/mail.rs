use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::mail::{MailRecord as DomainMailRecord, MailStatus, NewMailRecord as DomainNewMailRecord};
use crate::domain::types::{EmailAddress, MailRecordId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::mail_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MailRecord {
    pub id: i32,
    pub recipient: String,
    pub subject: String,
    pub status: String,
    pub sent_by: String,
    pub sent_at: NaiveDateTime,
    pub opened_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::mail_records)]
pub struct NewMailRecord<'a> {
    pub recipient: &'a str,
    pub subject: &'a str,
    pub status: &'a str,
    pub sent_by: &'a str,
}

impl TryFrom<MailRecord> for DomainMailRecord {
    type Error = TypeConstraintError;

    fn try_from(record: MailRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MailRecordId::new(record.id)?,
            recipient: EmailAddress::new(record.recipient)?,
            subject: record.subject,
            status: MailStatus::try_from(record.status.as_str())?,
            sent_by: record.sent_by,
            sent_at: record.sent_at,
            opened_at: record.opened_at,
        })
    }
}

impl<'a> From<&'a DomainNewMailRecord> for NewMailRecord<'a> {
    fn from(record: &'a DomainNewMailRecord) -> Self {
        Self {
            recipient: record.recipient.as_str(),
            subject: record.subject.as_str(),
            status: MailStatus::Sent.as_str(),
            sent_by: record.sent_by.as_str(),
        }
    }
}
