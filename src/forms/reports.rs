//! Daily report submission.

use serde::Deserialize;

use crate::domain::report::{Attendance, NewReport, ReportFile};
use crate::domain::types::{AssetUrl, MemberId, NonEmptyString, SanitizedText};
use crate::forms::{FormError, non_blank, parse_date, parse_time};

#[derive(Debug, Deserialize)]
/// Report form; attachments arrive as parallel repeated `file_name`/`file_url` keys.
pub struct SubmitReportForm {
    pub report_field: String,
    #[serde(default)]
    pub link_field: Option<String>,
    pub date: String,
    #[serde(default)]
    pub morning_time: Option<String>,
    #[serde(default)]
    pub evening_time: Option<String>,
    #[serde(default)]
    pub file_name: Vec<String>,
    #[serde(default)]
    pub file_url: Vec<String>,
}

impl SubmitReportForm {
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }
}

pub struct SubmitReportPayload {
    pub report_field: SanitizedText,
    pub link_field: Option<AssetUrl>,
    pub attendance: Attendance,
    pub upload_files: Vec<ReportFile>,
}

impl TryFrom<SubmitReportForm> for SubmitReportPayload {
    type Error = FormError;

    fn try_from(form: SubmitReportForm) -> Result<Self, Self::Error> {
        let report_field =
            SanitizedText::new(form.report_field).map_err(|_| FormError::InvalidText)?;
        let link_field = non_blank(form.link_field)
            .map(AssetUrl::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;
        let attendance = Attendance {
            date: parse_date(&form.date)?,
            morning_time: non_blank(form.morning_time)
                .map(|t| parse_time(&t))
                .transpose()?,
            evening_time: non_blank(form.evening_time)
                .map(|t| parse_time(&t))
                .transpose()?,
        };

        if form.file_name.len() != form.file_url.len() {
            return Err(FormError::Malformed(
                "every attachment needs a name and a url".to_string(),
            ));
        }
        let mut upload_files = Vec::new();
        for (name, url) in form.file_name.into_iter().zip(form.file_url) {
            if name.trim().is_empty() && url.trim().is_empty() {
                continue;
            }
            let name = NonEmptyString::new(name).map_err(|_| FormError::InvalidName)?;
            let url = AssetUrl::new(url).map_err(|_| FormError::InvalidUrl)?;
            upload_files.push(ReportFile::new(name, url));
        }

        Ok(Self {
            report_field,
            link_field,
            attendance,
            upload_files,
        })
    }
}

impl SubmitReportPayload {
    pub fn into_domain(self, user_id: MemberId, user_name: String) -> NewReport {
        NewReport {
            user_id,
            user_name,
            report_field: self.report_field,
            link_field: self.link_field,
            attendance: self.attendance,
            upload_files: self.upload_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::FileKind;

    #[test]
    fn attachments_are_paired_and_classified() {
        let form = SubmitReportForm::from_bytes(
            b"report_field=Called+12+leads&date=2026-02-03&morning_time=09%3A05\
              &file_name=Sheet&file_url=https%3A%2F%2Fdrive.test%2Fday.xlsx\
              &file_name=&file_url=",
        )
        .expect("parse");
        let payload = SubmitReportPayload::try_from(form).expect("valid");

        assert_eq!(payload.attendance.date.to_string(), "2026-02-03");
        assert_eq!(
            payload.attendance.morning_time.map(|t| t.to_string()).as_deref(),
            Some("09:05:00")
        );
        assert!(payload.attendance.evening_time.is_none());
        assert_eq!(payload.upload_files.len(), 1);
        assert_eq!(payload.upload_files[0].file_type, FileKind::Excel);
    }

    #[test]
    fn unpaired_attachments_are_rejected() {
        let form = SubmitReportForm {
            report_field: "Done".into(),
            link_field: None,
            date: "2026-02-03".into(),
            morning_time: None,
            evening_time: None,
            file_name: vec!["Only name".into()],
            file_url: vec![],
        };
        assert!(matches!(
            SubmitReportPayload::try_from(form),
            Err(FormError::Malformed(_))
        ));
    }
}
