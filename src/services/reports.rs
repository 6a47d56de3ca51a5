//! Daily work reports.

use crate::domain::report::Report;
use crate::domain::types::{MemberId, ReportId};
use crate::dto::reports::{ReportFilters, ReportsPageData};
use crate::dto::{ListView, distinct_options};
use crate::forms::reports::{SubmitReportForm, SubmitReportPayload};
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ReportReader, ReportWriter};
use crate::services::{ServiceError, ServiceResult};

fn current_member_id(user: &AuthenticatedUser) -> ServiceResult<MemberId> {
    let id: i32 = user.sub.parse().map_err(|_| {
        log::error!("Session subject {} is not a member id", user.sub);
        ServiceError::Unauthorized
    })?;
    Ok(MemberId::new(id)?)
}

fn can_see(report: &Report, user: &AuthenticatedUser, me: MemberId) -> bool {
    user.role().sees_everything() || report.user_id == me
}

pub fn list_reports<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: ReportFilters,
) -> ServiceResult<ReportsPageData>
where
    R: ReportReader + ?Sized,
{
    let me = current_member_id(user)?;
    let reports: Vec<Report> = repo
        .list_reports()?
        .into_iter()
        .filter(|report| can_see(report, user, me))
        .collect();

    let params = query.into_params(filters.into_fields());
    let users = distinct_options(reports.iter().map(|r| r.user_name.clone()));

    let listing = apply(&reports, &params);
    let view = ListView::new(&params, listing.total);

    Ok(ReportsPageData {
        reports: listing.into_paginated(),
        view,
        users,
        sees_everyone: user.role().sees_everything(),
    })
}

pub fn show_report<R>(repo: &R, user: &AuthenticatedUser, report_id: i32) -> ServiceResult<Report>
where
    R: ReportReader + ?Sized,
{
    let me = current_member_id(user)?;
    repo.get_report_by_id(ReportId::new(report_id)?)?
        .filter(|report| can_see(report, user, me))
        .ok_or(ServiceError::NotFound)
}

/// Files the current user's report for the attendance date.
///
/// A second report for the same date is a conflict.
pub fn submit_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SubmitReportForm,
) -> ServiceResult<Report>
where
    R: ReportWriter + ?Sized,
{
    let payload = SubmitReportPayload::try_from(form)?;
    let new_report = payload.into_domain(current_member_id(user)?, user.name.clone());

    repo.create_report(&new_report).map_err(|err| {
        let err = ServiceError::from(err);
        if matches!(err, ServiceError::Conflict(_)) {
            ServiceError::Conflict(format!(
                "A report for {} already exists",
                new_report.attendance.date
            ))
        } else {
            log::error!("Failed to submit report: {err}");
            err
        }
    })
}
