//! DTO modules that bridge services with templates and APIs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::listing::{ListParams, PAGE_SIZES, SortDirection};

pub mod api;
pub mod content;
pub mod enrollments;
pub mod files;
pub mod jobs;
pub mod leads;
pub mod mail;
pub mod reports;
pub mod team;

/// Current search, sort and filter state, echoed back into list templates.
#[derive(Debug, Serialize)]
pub struct ListView {
    pub search: String,
    pub sort: Option<String>,
    pub dir: &'static str,
    /// Direction a click on the sorted column asks for.
    pub same_column_dir: &'static str,
    /// Direction a click on any other column asks for.
    pub new_column_dir: &'static str,
    pub per_page: usize,
    pub page_sizes: [usize; 4],
    pub filters: BTreeMap<String, String>,
    pub total: usize,
}

impl ListView {
    pub fn new(params: &ListParams, total: usize) -> Self {
        Self {
            search: params.search.clone(),
            sort: params.sort.field.clone(),
            dir: params.sort.direction.as_str(),
            same_column_dir: params
                .sort
                .field
                .as_deref()
                .map_or(SortDirection::default(), |field| {
                    params.sort.select(field).direction
                })
                .as_str(),
            new_column_dir: SortDirection::default().as_str(),
            per_page: params.per_page,
            page_sizes: PAGE_SIZES,
            filters: params.filters.iter().cloned().collect(),
            total,
        }
    }
}

/// Sorted, de-duplicated dropdown options.
pub fn distinct_options<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
