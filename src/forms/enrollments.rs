use serde::Deserialize;
use validator::Validate;

use crate::domain::enrollment::NewEnrollment;
use crate::domain::types::{CourseName, EmailAddress, PersonName, StatusLabel};
use crate::forms::{FormError, non_blank};

#[derive(Deserialize, Validate)]
pub struct AddEnrollmentForm {
    #[validate(length(min = 1))]
    pub student_name: String,
    #[validate(email)]
    pub student_email: String,
    #[validate(length(min = 1))]
    pub course_name: String,
    #[serde(default)]
    pub status: Option<String>,
}

pub struct AddEnrollmentPayload {
    pub student_name: PersonName,
    pub student_email: EmailAddress,
    pub course_name: CourseName,
    pub status: Option<StatusLabel>,
}

impl TryFrom<AddEnrollmentForm> for AddEnrollmentPayload {
    type Error = FormError;

    fn try_from(form: AddEnrollmentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            student_name: PersonName::new(form.student_name).map_err(|_| FormError::InvalidName)?,
            student_email: EmailAddress::new(form.student_email)
                .map_err(|_| FormError::InvalidEmail)?,
            course_name: CourseName::new(form.course_name).map_err(|_| FormError::InvalidName)?,
            status: non_blank(form.status)
                .map(StatusLabel::new)
                .transpose()
                .map_err(|_| FormError::InvalidStatus)?,
        })
    }
}

impl AddEnrollmentPayload {
    pub fn into_domain(self, created_by: EmailAddress) -> NewEnrollment {
        NewEnrollment::new(
            self.student_name,
            self.student_email,
            self.course_name,
            self.status,
            created_by,
        )
    }
}

#[derive(Deserialize)]
pub struct EnrollmentStatusForm {
    pub status: String,
}

impl TryFrom<EnrollmentStatusForm> for StatusLabel {
    type Error = FormError;

    fn try_from(form: EnrollmentStatusForm) -> Result<Self, Self::Error> {
        StatusLabel::new(form.status).map_err(|_| FormError::InvalidStatus)
    }
}
