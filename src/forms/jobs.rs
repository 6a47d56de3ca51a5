//! Job listing uploads: spreadsheet exports (CSV) and API dumps (JSON).

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;

use crate::domain::job_listing::{JobRecord, NewJobListing};
use crate::forms::FormError;

#[derive(MultipartForm)]
pub struct UploadJobsForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

impl UploadJobsForm {
    fn contents(&self) -> Result<String, FormError> {
        std::fs::read_to_string(self.file.file.path())
            .map_err(|err| FormError::Upload(err.to_string()))
    }

    pub fn parse_csv(&self) -> Result<Vec<JobRecord>, FormError> {
        parse_jobs_csv(&self.contents()?)
    }

    pub fn parse_json(&self) -> Result<Vec<JobRecord>, FormError> {
        parse_jobs_json(&self.contents()?)
    }
}

/// Reads a CSV export whose header row holds the column names.
pub fn parse_jobs_csv(content: &str) -> Result<Vec<JobRecord>, FormError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| FormError::Upload(err.to_string()))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| FormError::Upload(err.to_string()))?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        records.push(JobRecord::from_columns(headers.iter().zip(row.iter())));
    }
    Ok(records)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonJobs {
    Many(Vec<JobRecord>),
    One(JobRecord),
}

/// Reads either a single job object or an array of them.
pub fn parse_jobs_json(content: &str) -> Result<Vec<JobRecord>, FormError> {
    let jobs: JsonJobs =
        serde_json::from_str(content).map_err(|err| FormError::Upload(err.to_string()))?;
    Ok(match jobs {
        JsonJobs::Many(records) => records,
        JsonJobs::One(record) => vec![record],
    })
}

/// Wraps parsed records, failing on the first one without a title.
pub fn into_new_listings(
    records: Vec<JobRecord>,
    created_by: &str,
) -> Result<Vec<NewJobListing>, FormError> {
    if records.is_empty() {
        return Err(FormError::EmptySelection);
    }
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            NewJobListing::try_new(record, created_by.to_string())
                .map_err(|err| FormError::Upload(format!("record {}: {err}", index + 1)))
        })
        .collect()
}
