//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

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
use crate::repository::{
    AssetReader, AssetWriter, BlogReader, BlogWriter, EnrollmentReader, EnrollmentWriter,
    JobListingReader, JobListingWriter, LeadReader, LeadWriter, MailReader, MailWriter,
    ReportReader, ReportWriter, SeoReader, SeoWriter, TeamReader, TeamWriter,
};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
        fn list_leads_assigned_to(&self, email: &EmailAddress) -> RepositoryResult<Vec<Lead>>;
        fn list_remarks(&self, lead_id: LeadId) -> RepositoryResult<Vec<Remark>>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
        fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead>;
        fn add_remark(&self, remark: &NewRemark) -> RepositoryResult<Remark>;
        fn assign_leads(&self, ids: &[LeadId], assignee: &Assignee) -> RepositoryResult<usize>;
        fn delete_lead(&self, id: LeadId) -> RepositoryResult<()>;
    }

    impl EnrollmentReader for Repository {
        fn get_enrollment_by_id(&self, id: EnrollmentId) -> RepositoryResult<Option<Enrollment>>;
        fn list_enrollments(&self) -> RepositoryResult<Vec<Enrollment>>;
    }

    impl EnrollmentWriter for Repository {
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

    impl TeamReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<TeamMember>>;
        fn get_member_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<TeamMember>>;
        fn list_members(&self) -> RepositoryResult<Vec<TeamMember>>;
    }

    impl TeamWriter for Repository {
        fn create_member(&self, new_member: &NewTeamMember) -> RepositoryResult<TeamMember>;
        fn delete_member(&self, id: MemberId) -> RepositoryResult<()>;
    }

    impl JobListingReader for Repository {
        fn list_job_listings(&self) -> RepositoryResult<Vec<JobListing>>;
    }

    impl JobListingWriter for Repository {
        fn create_job_listings(&self, listings: &[NewJobListing]) -> RepositoryResult<usize>;
        fn delete_job_listing(&self, id: JobListingId) -> RepositoryResult<()>;
    }

    impl ReportReader for Repository {
        fn get_report_by_id(&self, id: ReportId) -> RepositoryResult<Option<Report>>;
        fn list_reports(&self) -> RepositoryResult<Vec<Report>>;
    }

    impl ReportWriter for Repository {
        fn create_report(&self, new_report: &NewReport) -> RepositoryResult<Report>;
    }

    impl AssetReader for Repository {
        fn get_asset_by_id(&self, id: AssetId) -> RepositoryResult<Option<Asset>>;
        fn list_assets(&self) -> RepositoryResult<Vec<Asset>>;
    }

    impl AssetWriter for Repository {
        fn create_asset(&self, new_asset: &NewAsset) -> RepositoryResult<Asset>;
        fn delete_asset(&self, id: AssetId) -> RepositoryResult<()>;
    }

    impl SeoReader for Repository {
        fn get_seo_entry_by_id(&self, id: SeoEntryId) -> RepositoryResult<Option<SeoEntry>>;
        fn list_seo_entries(&self) -> RepositoryResult<Vec<SeoEntry>>;
    }

    impl SeoWriter for Repository {
        fn create_seo_entry(&self, entry: &SeoEntryData) -> RepositoryResult<SeoEntry>;
        fn update_seo_entry(&self, id: SeoEntryId, entry: &SeoEntryData) -> RepositoryResult<SeoEntry>;
        fn delete_seo_entry(&self, id: SeoEntryId) -> RepositoryResult<()>;
    }

    impl BlogReader for Repository {
        fn get_blog_post_by_id(&self, id: BlogPostId) -> RepositoryResult<Option<BlogPost>>;
        fn list_blog_posts(&self) -> RepositoryResult<Vec<BlogPost>>;
    }

    impl BlogWriter for Repository {
        fn create_blog_post(&self, post: &NewBlogPost) -> RepositoryResult<BlogPost>;
        fn set_blog_post_published(
            &self,
            id: BlogPostId,
            published: bool,
        ) -> RepositoryResult<BlogPost>;
        fn delete_blog_post(&self, id: BlogPostId) -> RepositoryResult<()>;
    }

    impl MailReader for Repository {
        fn get_mail_record_by_id(&self, id: MailRecordId) -> RepositoryResult<Option<MailRecord>>;
        fn list_mail_records(&self) -> RepositoryResult<Vec<MailRecord>>;
    }

    impl MailWriter for Repository {
        fn create_mail_record(&self, record: &NewMailRecord) -> RepositoryResult<MailRecord>;
        fn update_mail_status(
            &self,
            id: MailRecordId,
            status: MailStatus,
            opened_at: Option<NaiveDateTime>,
        ) -> RepositoryResult<MailRecord>;
        fn delete_mail_record(&self, id: MailRecordId) -> RepositoryResult<()>;
    }
}
