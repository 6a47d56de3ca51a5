use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::job_listing::JobListing;
use crate::dto::ListView;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct JobFilters {
    pub category: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl JobFilters {
    pub fn into_fields(self) -> [(&'static str, Option<String>); 3] {
        [
            ("category", self.category),
            ("location", self.location),
            ("job_type", self.job_type),
        ]
    }
}

/// A job listing with its fields resolved, whatever shape it was imported in.
#[derive(Clone, Debug, Serialize)]
pub struct JobRow {
    pub id: i32,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

impl From<&JobListing> for JobRow {
    fn from(listing: &JobListing) -> Self {
        let record = &listing.record;
        Self {
            id: listing.id.get(),
            title: record.title(),
            company: record.company(),
            location: record.location(),
            category: record.category(),
            job_type: record.job_type(),
            salary: record.salary(),
            apply_link: record.apply_link(),
            created_by: listing.created_by.clone(),
            created_at: listing.created_at,
        }
    }
}

#[derive(Debug)]
pub struct JobsPageData {
    pub jobs: Paginated<JobRow>,
    pub view: ListView,
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub can_edit: bool,
}
