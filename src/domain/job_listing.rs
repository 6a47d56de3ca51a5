//! Imported job listings.
//!
//! Listings arrive in two shapes: spreadsheet-style records keyed by
//! human-readable column names, and API-style nested objects. The shape is
//! decided once, when the record is deserialized, and the accessors below
//! answer for either variant.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{JobListingId, TypeConstraintError};

/// Company block of a nested job record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobCompany {
    pub name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// API-style job record: `{title, company: {name}, ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NestedJob {
    pub title: String,
    pub company: JobCompany,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
}

/// A job listing payload in either of the accepted shapes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JobRecord {
    Nested(NestedJob),
    Flat(BTreeMap<String, Value>),
}

pub const FLAT_TITLE: &str = "Job Title";
pub const FLAT_COMPANY: &str = "Company Name";
pub const FLAT_LOCATION: &str = "Location";
pub const FLAT_CATEGORY: &str = "Category";
pub const FLAT_JOB_TYPE: &str = "Job Type";
pub const FLAT_SALARY: &str = "Salary";
pub const FLAT_APPLY_LINK: &str = "Apply Link";

fn flat_text(map: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    Some(text).filter(|s| !s.is_empty())
}

impl JobRecord {
    /// Builds a flat record from spreadsheet columns, skipping blank cells.
    pub fn from_columns<I, K, V>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = columns
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_string(), v.into().trim().to_string()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        JobRecord::Flat(map)
    }

    pub fn title(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => Some(job.title.clone()),
            JobRecord::Flat(map) => flat_text(map, FLAT_TITLE),
        }
    }

    pub fn company(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => Some(job.company.name.clone()),
            JobRecord::Flat(map) => flat_text(map, FLAT_COMPANY),
        }
    }

    pub fn location(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => job.location.clone(),
            JobRecord::Flat(map) => flat_text(map, FLAT_LOCATION),
        }
    }

    pub fn category(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => job.category.clone(),
            JobRecord::Flat(map) => flat_text(map, FLAT_CATEGORY),
        }
    }

    pub fn job_type(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => job.job_type.clone(),
            JobRecord::Flat(map) => flat_text(map, FLAT_JOB_TYPE),
        }
    }

    pub fn salary(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => job.salary.clone(),
            JobRecord::Flat(map) => flat_text(map, FLAT_SALARY),
        }
    }

    pub fn apply_link(&self) -> Option<String> {
        match self {
            JobRecord::Nested(job) => job.apply_link.clone(),
            JobRecord::Flat(map) => flat_text(map, FLAT_APPLY_LINK),
        }
    }

    /// A record without a title is not a job listing.
    pub fn validate(&self) -> Result<(), TypeConstraintError> {
        match self.title() {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err(TypeConstraintError::InvalidValue(
                "job listing has no title".to_string(),
            )),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobListing {
    pub id: JobListingId,
    pub record: JobRecord,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewJobListing {
    pub record: JobRecord,
    pub created_by: String,
}

impl NewJobListing {
    /// Wraps a record after checking it carries a title.
    pub fn try_new(record: JobRecord, created_by: String) -> Result<Self, TypeConstraintError> {
        record.validate()?;
        Ok(Self { record, created_by })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_and_flat_shapes_resolve_to_the_same_fields() {
        let nested: JobRecord = serde_json::from_value(json!({
            "title": "Backend Engineer",
            "company": {"name": "Acme", "website": "https://acme.test"},
            "location": "Pune",
            "category": "IT"
        }))
        .expect("nested job");
        let flat: JobRecord = serde_json::from_value(json!({
            "Job Title": "Backend Engineer",
            "Company Name": "Acme",
            "Location": "Pune",
            "Category": "IT"
        }))
        .expect("flat job");

        assert!(matches!(nested, JobRecord::Nested(_)));
        assert!(matches!(flat, JobRecord::Flat(_)));
        for record in [&nested, &flat] {
            assert_eq!(record.title().as_deref(), Some("Backend Engineer"));
            assert_eq!(record.company().as_deref(), Some("Acme"));
            assert_eq!(record.location().as_deref(), Some("Pune"));
            assert_eq!(record.category().as_deref(), Some("IT"));
            assert_eq!(record.job_type(), None);
        }
    }

    #[test]
    fn flat_values_are_coerced_to_text() {
        let flat: JobRecord = serde_json::from_value(json!({
            "Job Title": "Analyst",
            "Salary": 45000,
            "Location": null,
            "Category": "  "
        }))
        .expect("flat job");

        assert_eq!(flat.salary().as_deref(), Some("45000"));
        assert_eq!(flat.location(), None);
        assert_eq!(flat.category(), None);
    }

    #[test]
    fn from_columns_skips_blank_cells() {
        let record = JobRecord::from_columns([
            ("Job Title", "Designer"),
            ("Company Name", " "),
            ("", "orphan"),
        ]);
        assert_eq!(record.title().as_deref(), Some("Designer"));
        assert_eq!(record.company(), None);
    }

    #[test]
    fn untitled_records_are_rejected() {
        let record = JobRecord::from_columns([("Company Name", "Acme")]);
        assert!(NewJobListing::try_new(record, "a@b.c".into()).is_err());
    }
}
