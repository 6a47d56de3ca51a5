//! Persistence traits and their Diesel implementation.
//!
//! Readers return whole collections; narrowing for display happens in
//! [`crate::listing`].

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::asset::{Asset, NewAsset};
use crate::domain::assignment::Assignee;
use crate::domain::content::{BlogPost, NewBlogPost, SeoEntry, SeoEntryData};
use crate::domain::enrollment::{Enrollment, NewEnrollment};
use crate::domain::job_listing::{JobListing, NewJobListing};
use crate::domain::lead::{Lead, NewLead, NewRemark, Remark, UpdateLead};
use crate::domain::mail::{MailRecord, MailStatus, NewMailRecord};
use crate::domain::report::{NewReport, Report};
use crate::domain::team_member::{NewTeamMember, TeamMember};
use crate::domain::types::{
    AssetId, BlogPostId, EmailAddress, EnrollmentId, JobListingId, LeadId, MailRecordId,
    MemberId, ReportId, SeoEntryId, StatusLabel,
};
use crate::repository::errors::RepositoryResult;

pub mod asset;
pub mod content;
pub mod enrollment;
pub mod errors;
pub mod job_listing;
pub mod lead;
pub mod mail;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod report;
pub mod team_member;

/// Diesel-backed repository shared by every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
    fn list_leads_assigned_to(&self, email: &EmailAddress) -> RepositoryResult<Vec<Lead>>;
    fn list_remarks(&self, lead_id: LeadId) -> RepositoryResult<Vec<Remark>>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
    fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead>;
    /// Stores the remark and moves the lead to the remark's status.
    fn add_remark(&self, remark: &NewRemark) -> RepositoryResult<Remark>;
    /// Assigns every listed lead in one transaction.
    fn assign_leads(&self, ids: &[LeadId], assignee: &Assignee) -> RepositoryResult<usize>;
    fn delete_lead(&self, id: LeadId) -> RepositoryResult<()>;
}

pub trait EnrollmentReader {
    fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>>;
    fn list_enrollments(&self) -> RepositoryResult<Vec<Enrollment>>;
}

pub trait EnrollmentWriter {
    fn create_enrollment(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment>;
    fn update_enrollment_status(
        &self,
        id: EnrollmentId,
        status: &StatusLabel,
    ) -> RepositoryResult<Enrollment>;
    fn assign_enrollment(
        &self,
        id: EnrollmentId,
        assignee: &Assignee,
    ) -> RepositoryResult<Enrollment>;
    fn delete_enrollment(&self, id: EnrollmentId) -> RepositoryResult<()>;
}

pub trait TeamReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<TeamMember>>;
    fn get_member_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<TeamMember>>;
    fn list_members(&self) -> RepositoryResult<Vec<TeamMember>>;
}

pub trait TeamWriter {
    fn create_member(&self, new_member: &NewTeamMember) -> RepositoryResult<TeamMember>;
    fn delete_member(&self, id: MemberId) -> RepositoryResult<()>;
}

pub trait JobListingReader {
    fn list_job_listings(&self) -> RepositoryResult<Vec<JobListing>>;
}

pub trait JobListingWriter {
    fn create_job_listings(&self, listings: &[NewJobListing]) -> RepositoryResult<usize>;
    fn delete_job_listing(&self, id: JobListingId) -> RepositoryResult<()>;
}

pub trait ReportReader {
    fn get_report_by_id(&self, id: ReportId) -> RepositoryResult<Option<Report>>;
    fn list_reports(&self) -> RepositoryResult<Vec<Report>>;
}

pub trait ReportWriter {
    /// Stores the report together with its attachments.
    fn create_report(&self, new_report: &NewReport) -> RepositoryResult<Report>;
}

pub trait AssetReader {
    fn get_asset_by_id(&self, id: AssetId) -> RepositoryResult<Option<Asset>>;
    fn list_assets(&self) -> RepositoryResult<Vec<Asset>>;
}

pub trait AssetWriter {
    fn create_asset(&self, new_asset: &NewAsset) -> RepositoryResult<Asset>;
    fn delete_asset(&self, id: AssetId) -> RepositoryResult<()>;
}

pub trait SeoReader {
    fn get_seo_entry_by_id(&self, id: SeoEntryId) -> RepositoryResult<Option<SeoEntry>>;
    fn list_seo_entries(&self) -> RepositoryResult<Vec<SeoEntry>>;
}

pub trait SeoWriter {
    fn create_seo_entry(&self, entry: &SeoEntryData) -> RepositoryResult<SeoEntry>;
    fn update_seo_entry(&self, id: SeoEntryId, entry: &SeoEntryData) -> RepositoryResult<SeoEntry>;
    fn delete_seo_entry(&self, id: SeoEntryId) -> RepositoryResult<()>;
}

pub trait BlogReader {
    fn get_blog_post_by_id(&self, id: BlogPostId) -> RepositoryResult<Option<BlogPost>>;
    fn list_blog_posts(&self) -> RepositoryResult<Vec<BlogPost>>;
}

pub trait BlogWriter {
    fn create_blog_post(&self, post: &NewBlogPost) -> RepositoryResult<BlogPost>;
    fn set_blog_post_published(&self, id: BlogPostId, published: bool)
    -> RepositoryResult<BlogPost>;
    fn delete_blog_post(&self, id: BlogPostId) -> RepositoryResult<()>;
}

pub trait MailReader {
    fn get_mail_record_by_id(&self, id: MailRecordId) -> RepositoryResult<Option<MailRecord>>;
    fn list_mail_records(&self) -> RepositoryResult<Vec<MailRecord>>;
}

pub trait MailWriter {
    fn create_mail_record(&self, record: &NewMailRecord) -> RepositoryResult<MailRecord>;
    fn update_mail_status(
        &self,
        id: MailRecordId,
        status: MailStatus,
        opened_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<MailRecord>;
    fn delete_mail_record(&self, id: MailRecordId) -> RepositoryResult<()>;
}
