use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::enrollment::{Enrollment as DomainEnrollment, NewEnrollment as DomainNewEnrollment};
use crate::domain::types::{
    CourseName, EmailAddress, EnrollmentId, PersonName, StatusLabel, TypeConstraintError,
};
use crate::models::assignee_from_columns;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Enrollment {
    pub id: i32,
    pub student_name: String,
    pub student_email: String,
    pub course_name: String,
    pub status: String,
    pub assigned_to_email: Option<String>,
    pub assigned_to_name: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::enrollments)]
pub struct NewEnrollment<'a> {
    pub student_name: &'a str,
    pub student_email: &'a str,
    pub course_name: &'a str,
    pub status: &'a str,
    pub created_by: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Enrollment> for DomainEnrollment {
    type Error = TypeConstraintError;

    fn try_from(enrollment: Enrollment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EnrollmentId::new(enrollment.id)?,
            student_name: PersonName::new(enrollment.student_name)?,
            student_email: EmailAddress::new(enrollment.student_email)?,
            course_name: CourseName::new(enrollment.course_name)?,
            status: StatusLabel::new(enrollment.status)?,
            assigned_to: assignee_from_columns(
                enrollment.assigned_to_name,
                enrollment.assigned_to_email,
            )?,
            created_by: enrollment.created_by,
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        })
    }
}

impl<'a> NewEnrollment<'a> {
    pub fn from_domain(enrollment: &'a DomainNewEnrollment, now: NaiveDateTime) -> Self {
        Self {
            student_name: enrollment.student_name.as_str(),
            student_email: enrollment.student_email.as_str(),
            course_name: enrollment.course_name.as_str(),
            status: enrollment.status.as_str(),
            created_by: enrollment.created_by.as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}
