use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::assignment::Assignee;
use crate::domain::role::Role;
use crate::domain::types::{CourseName, EmailAddress, EnrollmentId, PersonName, StatusLabel};

/// Status given to enrollments created without an explicit one.
pub const DEFAULT_ENROLLMENT_STATUS: &str = "pending";

/// A course sign-up record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_name: PersonName,
    pub student_email: EmailAddress,
    pub course_name: CourseName,
    pub status: StatusLabel,
    pub assigned_to: Option<Assignee>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Enrollment {
    /// Same visibility rule as leads: admins and managers, the assignee and the creator.
    pub fn is_visible_to(&self, email: &str, role: &Role) -> bool {
        role.sees_everything()
            || self.created_by.eq_ignore_ascii_case(email)
            || self
                .assigned_to
                .as_ref()
                .is_some_and(|assignee| assignee.email.as_str().eq_ignore_ascii_case(email))
    }
}

#[derive(Clone, Debug)]
pub struct NewEnrollment {
    pub student_name: PersonName,
    pub student_email: EmailAddress,
    pub course_name: CourseName,
    pub status: StatusLabel,
    pub created_by: EmailAddress,
}

impl NewEnrollment {
    #[must_use]
    pub fn new(
        student_name: PersonName,
        student_email: EmailAddress,
        course_name: CourseName,
        status: Option<StatusLabel>,
        created_by: EmailAddress,
    ) -> Self {
        Self {
            student_name,
            student_email,
            course_name,
            status: status.unwrap_or_else(|| StatusLabel::from_static(DEFAULT_ENROLLMENT_STATUS)),
            created_by,
        }
    }
}
