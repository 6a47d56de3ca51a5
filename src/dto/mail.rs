use serde::Deserialize;

use crate::domain::mail::MailRecord;
use crate::dto::ListView;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct MailFilters {
    pub status: Option<String>,
}

impl MailFilters {
    pub fn into_fields(self) -> [(&'static str, Option<String>); 1] {
        [("status", self.status)]
    }
}

#[derive(Debug)]
pub struct MailPageData {
    pub records: Paginated<MailRecord>,
    pub view: ListView,
    pub can_delete: bool,
}
