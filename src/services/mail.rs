//! Tracking of mails sent to leads.

use chrono::Utc;

use crate::domain::mail::{MailRecord, MailStatus};
use crate::domain::role::Role;
use crate::domain::types::{EmailAddress, MailRecordId};
use crate::dto::ListView;
use crate::dto::mail::{MailFilters, MailPageData};
use crate::forms::mail::RecordMailForm;
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{MailReader, MailWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

const MAIL_ROLES: [Role; 3] = [Role::Admin, Role::Marketing, Role::Sales];

pub fn list_mail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: MailFilters,
) -> ServiceResult<MailPageData>
where
    R: MailReader + ?Sized,
{
    ensure_role(user, &MAIL_ROLES)?;

    let records = repo.list_mail_records()?;
    let params = query.into_params(filters.into_fields());
    let listing = apply(&records, &params);
    let view = ListView::new(&params, listing.total);

    Ok(MailPageData {
        records: listing.into_paginated(),
        view,
        can_delete: user.is_admin(),
    })
}

pub fn record_mail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RecordMailForm,
) -> ServiceResult<MailRecord>
where
    R: MailWriter + ?Sized,
{
    ensure_role(user, &MAIL_ROLES)?;

    let record = form.into_domain(EmailAddress::new(user.email.as_str())?)?;
    Ok(repo.create_mail_record(&record)?)
}

/// Moves a mail to `status`; `opened` also stamps the open time.
pub fn mark_mail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    record_id: i32,
    status: MailStatus,
) -> ServiceResult<MailRecord>
where
    R: MailReader + MailWriter + ?Sized,
{
    ensure_role(user, &MAIL_ROLES)?;

    let record_id = MailRecordId::new(record_id)?;
    let record = repo
        .get_mail_record_by_id(record_id)?
        .ok_or(ServiceError::NotFound)?;

    let next = record.transition(status)?;
    if next == record.status {
        return Ok(record);
    }
    let opened_at = match next {
        MailStatus::Opened => Some(Utc::now().naive_utc()),
        _ => record.opened_at,
    };

    Ok(repo.update_mail_status(record_id, next, opened_at)?)
}

pub fn delete_mail<R>(repo: &R, user: &AuthenticatedUser, record_id: i32) -> ServiceResult<()>
where
    R: MailWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    repo.delete_mail_record(MailRecordId::new(record_id)?)?;
    Ok(())
}
