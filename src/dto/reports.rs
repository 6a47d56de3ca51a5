use serde::Deserialize;

use crate::domain::report::Report;
use crate::dto::ListView;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct ReportFilters {
    /// Attendance date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub user: Option<String>,
}

impl ReportFilters {
    pub fn into_fields(self) -> [(&'static str, Option<String>); 2] {
        [("attendance.date", self.date), ("user_name", self.user)]
    }
}

#[derive(Debug)]
pub struct ReportsPageData {
    pub reports: Paginated<Report>,
    pub view: ListView,
    pub users: Vec<String>,
    pub sees_everyone: bool,
}
