//! Job listing board and imports.

use crate::domain::job_listing::JobRecord;
use crate::domain::role::Role;
use crate::domain::types::JobListingId;
use crate::dto::jobs::{JobFilters, JobRow, JobsPageData};
use crate::dto::{ListView, distinct_options};
use crate::forms::jobs::into_new_listings;
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{JobListingReader, JobListingWriter};
use crate::services::{ServiceResult, ensure_role};

const JOB_EDIT_ROLES: [Role; 2] = [Role::Admin, Role::Marketing];

pub fn list_jobs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: JobFilters,
) -> ServiceResult<JobsPageData>
where
    R: JobListingReader + ?Sized,
{
    let rows: Vec<JobRow> = repo.list_job_listings()?.iter().map(JobRow::from).collect();

    let params = query.into_params(filters.into_fields());
    let categories = distinct_options(rows.iter().filter_map(|row| row.category.clone()));
    let locations = distinct_options(rows.iter().filter_map(|row| row.location.clone()));
    let job_types = distinct_options(rows.iter().filter_map(|row| row.job_type.clone()));

    let listing = apply(&rows, &params);
    let view = ListView::new(&params, listing.total);

    Ok(JobsPageData {
        jobs: listing.into_paginated(),
        view,
        categories,
        locations,
        job_types,
        can_edit: user.has_any_role(&JOB_EDIT_ROLES),
    })
}

/// Stores parsed records; every record must carry a title.
pub fn import_jobs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    records: Vec<JobRecord>,
) -> ServiceResult<usize>
where
    R: JobListingWriter + ?Sized,
{
    ensure_role(user, &JOB_EDIT_ROLES)?;

    let listings = into_new_listings(records, &user.email)?;
    let count = repo.create_job_listings(&listings)?;
    log::info!("{} imported {count} job listings", user.email);
    Ok(count)
}

pub fn delete_job<R>(repo: &R, user: &AuthenticatedUser, job_id: i32) -> ServiceResult<()>
where
    R: JobListingWriter + ?Sized,
{
    ensure_role(user, &JOB_EDIT_ROLES)?;

    repo.delete_job_listing(JobListingId::new(job_id)?)?;
    Ok(())
}
