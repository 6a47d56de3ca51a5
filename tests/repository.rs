use chrono::{NaiveDate, NaiveTime};
use elite_crm::domain::asset::{FileKind, NewAsset};
use elite_crm::domain::assignment::Assignee;
use elite_crm::domain::content::{NewBlogPost, SeoEntryData, parse_keywords};
use elite_crm::domain::enrollment::NewEnrollment;
use elite_crm::domain::job_listing::{JobRecord, NewJobListing};
use elite_crm::domain::lead::{NewLead, NewRemark, UpdateLead};
use elite_crm::domain::mail::{MailStatus, NewMailRecord};
use elite_crm::domain::report::{Attendance, NewReport, ReportFile};
use elite_crm::domain::role::Role;
use elite_crm::domain::team_member::NewTeamMember;
use elite_crm::domain::types::{
    AssetName, AssetUrl, CourseName, EmailAddress, LeadId, NonEmptyString, PersonName,
    PhoneNumber, ProductCompany, SanitizedText, StatusLabel, Title,
};
use elite_crm::repository::errors::RepositoryError;
use elite_crm::repository::{
    AssetReader, AssetWriter, BlogReader, BlogWriter, DieselRepository, EnrollmentReader,
    EnrollmentWriter, JobListingReader, JobListingWriter, LeadReader, LeadWriter, MailReader,
    MailWriter, ReportReader, ReportWriter, SeoReader, SeoWriter, TeamReader, TeamWriter,
};

mod common;

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).unwrap()
}

fn member(name: &str, address: &str, role: Role) -> NewTeamMember {
    NewTeamMember::new(
        PersonName::new(name).unwrap(),
        email(address),
        role,
        "hash".to_string(),
    )
}

fn lead(name: &str, created_by: &str) -> NewLead {
    NewLead::new(
        PersonName::new(name).unwrap(),
        None,
        None,
        ProductCompany::new("Elite MBA").unwrap(),
        email(created_by),
    )
}

#[test]
fn test_team_repository_crud() {
    let test_db = common::TestDb::new("test_team_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let ravi = repo
        .create_member(&member("Ravi", "ravi@example.com", Role::Sales))
        .unwrap();
    assert_eq!(ravi.role, Role::Sales);

    let found = repo
        .get_member_by_email(&email("ravi@example.com"))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, ravi.id);

    let duplicate = repo.create_member(&member("Other", "ravi@example.com", Role::Marketing));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    repo.delete_member(ravi.id).unwrap();
    assert!(repo.get_member_by_id(ravi.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_member(ravi.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_lead_repository_crud() {
    let test_db = common::TestDb::new("test_lead_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .create_lead(
            &lead("Asha Verma", "counsellor@example.com")
                .with_status(StatusLabel::new("Interested").unwrap()),
        )
        .unwrap();
    assert_eq!(first.status.as_str(), "interested");
    assert_eq!(first.call_status.as_str(), "pending");
    assert!(first.assigned_to.is_none());

    let batch = vec![
        lead("Kiran Rao", "counsellor@example.com"),
        lead("Meera Shah", "counsellor@example.com"),
    ];
    assert_eq!(repo.create_leads(&batch).unwrap(), 2);
    assert_eq!(repo.list_leads().unwrap().len(), 3);

    let updated = repo
        .update_lead(
            first.id,
            &UpdateLead {
                full_name: PersonName::new("Asha V. Verma").unwrap(),
                email: Some(email("asha@example.com")),
                phone_no: Some(PhoneNumber::new("+919876543210").unwrap()),
                product_company: first.product_company.clone(),
                status: first.status.clone(),
                call_status: StatusLabel::new("Called").unwrap(),
            },
        )
        .unwrap();
    assert_eq!(updated.full_name.as_str(), "Asha V. Verma");
    assert_eq!(updated.phone_no.as_deref(), Some("+919876543210"));
    assert_eq!(updated.call_status.as_str(), "called");

    let remark = repo
        .add_remark(&NewRemark {
            lead_id: first.id,
            status: StatusLabel::new("Follow up").unwrap(),
            message: SanitizedText::new("Call back on Monday").unwrap(),
            reminder_date: None,
            created_by: email("counsellor@example.com"),
        })
        .unwrap();
    assert_eq!(remark.lead_id, first.id);
    let reloaded = repo.get_lead_by_id(first.id).unwrap().unwrap();
    assert_eq!(reloaded.status.as_str(), "follow up");
    assert_eq!(reloaded.remarks, vec![remark.clone()]);
    assert_eq!(repo.list_remarks(first.id).unwrap().len(), 1);
    let listed = repo.list_leads().unwrap();
    let listed_first = listed.iter().find(|l| l.id == first.id).unwrap();
    assert_eq!(listed_first.remarks.len(), 1);
    assert!(listed.iter().filter(|l| l.id != first.id).all(|l| l.remarks.is_empty()));

    let assignee = Assignee::try_new(Some("Ravi".into()), "ravi@example.com".into()).unwrap();
    let ids: Vec<LeadId> = repo.list_leads().unwrap().iter().map(|l| l.id).collect();
    assert_eq!(repo.assign_leads(&ids[..2], &assignee).unwrap(), 2);
    assert_eq!(
        repo.list_leads_assigned_to(&email("ravi@example.com"))
            .unwrap()
            .len(),
        2
    );

    let missing = LeadId::new(9999).unwrap();
    assert!(matches!(
        repo.assign_leads(&[ids[2], missing], &assignee),
        Err(RepositoryError::NotFound)
    ));
    let untouched = repo.get_lead_by_id(ids[2]).unwrap().unwrap();
    assert!(untouched.assigned_to.is_none());

    repo.delete_lead(first.id).unwrap();
    assert!(repo.get_lead_by_id(first.id).unwrap().is_none());
    assert!(repo.list_remarks(first.id).unwrap().is_empty());
}

#[test]
fn test_enrollment_repository_crud() {
    let test_db = common::TestDb::new("test_enrollment_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let enrollment = repo
        .create_enrollment(&NewEnrollment::new(
            PersonName::new("Neha Gupta").unwrap(),
            email("neha@example.com"),
            CourseName::new("Online MBA").unwrap(),
            None,
            email("sales@example.com"),
        ))
        .unwrap();
    assert!(enrollment.assigned_to.is_none());

    let status = StatusLabel::new("Enrolled").unwrap();
    let updated = repo
        .update_enrollment_status(enrollment.id, &status)
        .unwrap();
    assert_eq!(updated.status.as_str(), "enrolled");

    let assignee = Assignee::try_new(None, "ravi@example.com".into()).unwrap();
    let assigned = repo.assign_enrollment(enrollment.id, &assignee).unwrap();
    assert_eq!(
        assigned.assigned_to.map(|a| a.email.as_str().to_string()),
        Some("ravi@example.com".to_string())
    );

    assert_eq!(repo.list_enrollments().unwrap().len(), 1);
    repo.delete_enrollment(enrollment.id).unwrap();
    assert!(repo.get_enrollment_by_id(enrollment.id).unwrap().is_none());
}

#[test]
fn test_job_listing_repository_crud() {
    let test_db = common::TestDb::new("test_job_listing_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let flat = JobRecord::from_columns([("Job Title", "Analyst"), ("Company Name", "Acme")]);
    let nested: JobRecord =
        serde_json::from_str(r#"{"title": "Engineer", "company": {"name": "Globex"}}"#).unwrap();
    let listings = vec![
        NewJobListing::try_new(flat, "admin@example.com".into()).unwrap(),
        NewJobListing::try_new(nested, "admin@example.com".into()).unwrap(),
    ];
    assert_eq!(repo.create_job_listings(&listings).unwrap(), 2);

    let stored = repo.list_job_listings().unwrap();
    assert_eq!(stored.len(), 2);
    let mut titles: Vec<String> = stored.iter().filter_map(|l| l.record.title()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Analyst", "Engineer"]);

    let engineer = stored
        .iter()
        .find(|l| l.record.title().as_deref() == Some("Engineer"))
        .unwrap();
    assert_eq!(engineer.record.company().as_deref(), Some("Globex"));

    repo.delete_job_listing(engineer.id).unwrap();
    assert_eq!(repo.list_job_listings().unwrap().len(), 1);
}

#[test]
fn test_report_repository_rejects_second_report_for_same_day() {
    let test_db = common::TestDb::new("test_report_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let author = repo
        .create_member(&member("Ravi", "ravi@example.com", Role::Sales))
        .unwrap();
    let attendance = Attendance {
        date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        morning_time: NaiveTime::from_hms_opt(9, 30, 0),
        evening_time: None,
    };
    let new_report = NewReport {
        user_id: author.id,
        user_name: author.name.as_str().to_string(),
        report_field: SanitizedText::new("Called twelve leads").unwrap(),
        link_field: None,
        attendance: attendance.clone(),
        upload_files: vec![ReportFile::new(
            NonEmptyString::new("Call sheet").unwrap(),
            AssetUrl::new("https://drive.test/calls.pdf").unwrap(),
        )],
    };

    let report = repo.create_report(&new_report).unwrap();
    assert_eq!(report.attendance, attendance);
    assert_eq!(report.upload_files.len(), 1);
    assert_eq!(report.upload_files[0].file_type, FileKind::Pdf);

    let loaded = repo.get_report_by_id(report.id).unwrap().unwrap();
    assert_eq!(loaded.upload_files, report.upload_files);

    let again = repo.create_report(&new_report);
    assert!(matches!(again, Err(RepositoryError::Duplicate(_))));
    assert_eq!(repo.list_reports().unwrap().len(), 1);
}

#[test]
fn test_asset_repository_crud() {
    let test_db = common::TestDb::new("test_asset_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let asset = repo
        .create_asset(&NewAsset {
            name: AssetName::new("Campus banner").unwrap(),
            image_url: AssetUrl::new("https://cdn.test/banner.png").unwrap(),
            product_company: ProductCompany::new("Elite MBA").unwrap(),
            created_by: email("marketing@example.com"),
            creator_role: Role::Marketing,
            is_social_media: true,
        })
        .unwrap();
    assert_eq!(asset.kind(), FileKind::Image);
    assert!(asset.is_social_media);

    assert_eq!(repo.list_assets().unwrap().len(), 1);
    repo.delete_asset(asset.id).unwrap();
    assert!(repo.get_asset_by_id(asset.id).unwrap().is_none());
}

#[test]
fn test_content_repository_crud() {
    let test_db = common::TestDb::new("test_content_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let data = SeoEntryData {
        page_url: AssetUrl::new("https://elite.test/mba").unwrap(),
        meta_title: Title::new("Online MBA").unwrap(),
        meta_description: "Study while you work".to_string(),
        keywords: parse_keywords("mba, online"),
    };
    let entry = repo.create_seo_entry(&data).unwrap();
    assert_eq!(entry.keywords, vec!["mba", "online"]);

    let duplicate = repo.create_seo_entry(&data);
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    let replaced = repo
        .update_seo_entry(
            entry.id,
            &SeoEntryData {
                meta_title: Title::new("Online MBA 2026").unwrap(),
                keywords: Vec::new(),
                ..data.clone()
            },
        )
        .unwrap();
    assert_eq!(replaced.meta_title.as_str(), "Online MBA 2026");
    assert!(replaced.keywords.is_empty());
    repo.delete_seo_entry(entry.id).unwrap();
    assert!(repo.get_seo_entry_by_id(entry.id).unwrap().is_none());

    let post = repo
        .create_blog_post(
            &NewBlogPost::new(
                Title::new("Choosing a course").unwrap(),
                "Editor".to_string(),
                SanitizedText::new("<p>Start here</p>").unwrap(),
                false,
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(post.slug.as_str(), "choosing-a-course");
    assert!(!post.published);

    let published = repo.set_blog_post_published(post.id, true).unwrap();
    assert!(published.published);
    assert_eq!(repo.list_blog_posts().unwrap().len(), 1);
    repo.delete_blog_post(post.id).unwrap();
    assert!(repo.get_blog_post_by_id(post.id).unwrap().is_none());
}

#[test]
fn test_mail_repository_crud() {
    let test_db = common::TestDb::new("test_mail_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let record = repo
        .create_mail_record(&NewMailRecord {
            recipient: email("lead@example.com"),
            subject: NonEmptyString::new("Your brochure").unwrap(),
            sent_by: email("sales@example.com"),
        })
        .unwrap();
    assert_eq!(record.status, MailStatus::Sent);
    assert!(record.opened_at.is_none());

    let opened_at = chrono::Utc::now().naive_utc();
    let opened = repo
        .update_mail_status(record.id, MailStatus::Opened, Some(opened_at))
        .unwrap();
    assert_eq!(opened.status, MailStatus::Opened);
    assert!(opened.opened_at.is_some());

    assert_eq!(repo.list_mail_records().unwrap().len(), 1);
    repo.delete_mail_record(record.id).unwrap();
    assert!(repo.get_mail_record_by_id(record.id).unwrap().is_none());
}
