use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::asset::FileKind;
use crate::domain::types::{AssetUrl, MemberId, NonEmptyString, ReportId, SanitizedText};

/// Check-in/check-out times for the day a report covers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attendance {
    pub date: NaiveDate,
    pub morning_time: Option<NaiveTime>,
    pub evening_time: Option<NaiveTime>,
}

/// A file attached to a daily report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportFile {
    pub file_name: String,
    pub file_url: String,
    pub file_type: FileKind,
}

impl ReportFile {
    /// Builds an attachment, classifying it from its URL.
    pub fn new(file_name: NonEmptyString, file_url: AssetUrl) -> Self {
        let file_type = FileKind::classify(file_url.as_str());
        Self {
            file_name: file_name.into_inner(),
            file_url: file_url.into_inner(),
            file_type,
        }
    }
}

/// Daily work report submitted by a team member.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: ReportId,
    pub user_id: MemberId,
    pub user_name: String,
    pub report_field: String,
    pub link_field: Option<String>,
    pub attendance: Attendance,
    pub upload_files: Vec<ReportFile>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewReport {
    pub user_id: MemberId,
    pub user_name: String,
    pub report_field: SanitizedText,
    pub link_field: Option<AssetUrl>,
    pub attendance: Attendance,
    pub upload_files: Vec<ReportFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_file_is_classified_from_its_url() {
        let file = ReportFile::new(
            NonEmptyString::new("Daily sheet").expect("valid name"),
            AssetUrl::new("https://drive.test/sheet.xlsx").expect("valid url"),
        );
        assert_eq!(file.file_type, FileKind::Excel);
        assert_eq!(file.file_name, "Daily sheet");
    }
}
