use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use crate::domain::asset::FileKind;
use crate::domain::report::{
    Attendance, NewReport as DomainNewReport, Report as DomainReport, ReportFile as DomainReportFile,
};
use crate::domain::types::{MemberId, ReportId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Report {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub report_field: String,
    pub link_field: Option<String>,
    pub attendance_date: NaiveDate,
    pub morning_time: Option<NaiveTime>,
    pub evening_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reports)]
pub struct NewReport<'a> {
    pub user_id: i32,
    pub user_name: &'a str,
    pub report_field: &'a str,
    pub link_field: Option<&'a str>,
    pub attendance_date: NaiveDate,
    pub morning_time: Option<NaiveTime>,
    pub evening_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::report_files)]
#[diesel(belongs_to(Report, foreign_key = report_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReportFile {
    pub id: i32,
    pub report_id: i32,
    pub file_name: String,
    pub file_url: String,
    pub file_type: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::report_files)]
pub struct NewReportFile<'a> {
    pub report_id: i32,
    pub file_name: &'a str,
    pub file_url: &'a str,
    pub file_type: &'a str,
}

impl From<ReportFile> for DomainReportFile {
    fn from(file: ReportFile) -> Self {
        let file_type = FileKind::parse(&file.file_type)
            .unwrap_or_else(|| FileKind::classify(&file.file_url));
        Self {
            file_name: file.file_name,
            file_url: file.file_url,
            file_type,
        }
    }
}

impl Report {
    /// Combines the row with its attachments.
    pub fn into_domain(self, files: Vec<ReportFile>) -> Result<DomainReport, TypeConstraintError> {
        Ok(DomainReport {
            id: ReportId::new(self.id)?,
            user_id: MemberId::new(self.user_id)?,
            user_name: self.user_name,
            report_field: self.report_field,
            link_field: self.link_field.filter(|l| !l.trim().is_empty()),
            attendance: Attendance {
                date: self.attendance_date,
                morning_time: self.morning_time,
                evening_time: self.evening_time,
            },
            upload_files: files.into_iter().map(Into::into).collect(),
            created_at: self.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewReport> for NewReport<'a> {
    fn from(report: &'a DomainNewReport) -> Self {
        Self {
            user_id: report.user_id.get(),
            user_name: report.user_name.as_str(),
            report_field: report.report_field.as_str(),
            link_field: report.link_field.as_ref().map(|l| l.as_str()),
            attendance_date: report.attendance.date,
            morning_time: report.attendance.morning_time,
            evening_time: report.attendance.evening_time,
        }
    }
}

impl<'a> NewReportFile<'a> {
    pub fn from_domain(report_id: i32, file: &'a DomainReportFile) -> Self {
        Self {
            report_id,
            file_name: file.file_name.as_str(),
            file_url: file.file_url.as_str(),
            file_type: file.file_type.as_str(),
        }
    }
}
