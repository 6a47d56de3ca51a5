use serde::Deserialize;

use crate::domain::enrollment::Enrollment;
use crate::domain::team_member::TeamMember;
use crate::dto::ListView;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct EnrollmentFilters {
    pub status: Option<String>,
    pub course_name: Option<String>,
}

impl EnrollmentFilters {
    pub fn into_fields(self) -> [(&'static str, Option<String>); 2] {
        [("status", self.status), ("course_name", self.course_name)]
    }
}

#[derive(Debug)]
pub struct EnrollmentsPageData {
    pub enrollments: Paginated<Enrollment>,
    pub view: ListView,
    pub statuses: Vec<String>,
    pub courses: Vec<String>,
    pub assignable: Vec<TeamMember>,
    pub can_assign: bool,
    pub can_delete: bool,
}
