//! In-memory search, filter, sort and pagination for list views.
//!
//! Every list page fetches its whole collection and narrows it here. Items
//! are inspected through their `serde_json` representation, so any entity
//! that serializes can be listed without per-type glue.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::Paginated;

/// Page sizes offered by the list views.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
/// Page size used when none (or an unsupported one) is requested.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Field whose values are compared as timestamps rather than text.
pub const CREATED_AT_FIELD: &str = "created_at";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Selected sort column and direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }

    /// State after the user clicks on `field`: the same column flips its
    /// direction, any other column starts descending.
    pub fn select(&self, field: &str) -> Self {
        match &self.field {
            Some(current) if current == field => Self::by(field, self.direction.toggled()),
            _ => Self::by(field, SortDirection::default()),
        }
    }
}

/// Falls back to [`DEFAULT_PAGE_SIZE`] for anything outside [`PAGE_SIZES`].
pub fn normalize_page_size(per_page: Option<usize>) -> usize {
    per_page
        .filter(|size| PAGE_SIZES.contains(size))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Query-string parameters shared by every list page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListQuery {
    /// Combines the shared parameters with the page's dropdown filters.
    pub fn into_params<'a, I>(self, filters: I) -> ListParams
    where
        I: IntoIterator<Item = (&'a str, Option<String>)>,
    {
        let mut params = ListParams::new()
            .with_search(self.search.unwrap_or_default())
            .with_page(self.page.unwrap_or(1), self.per_page);
        if let Some(field) = self.sort.filter(|s| !s.trim().is_empty()) {
            params = params.sorted_by(field, self.dir.unwrap_or_default());
        }
        for (field, value) in filters {
            if let Some(value) = value {
                params = params.with_filter(field, value);
            }
        }
        params
    }
}

impl ListQuery {
    /// For pages without dropdown filters.
    pub fn into_unfiltered_params(self) -> ListParams {
        self.into_params(Vec::<(&str, Option<String>)>::new())
    }
}

/// What to show of a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListParams {
    pub search: String,
    pub filters: Vec<(String, String)>,
    pub sort: SortState,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            sort: SortState::default(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_string();
        self
    }

    /// Adds an exact-match filter; an empty value means "all" and is dropped.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into().trim().to_string();
        if !value.is_empty() {
            self.filters.push((field.into(), value));
        }
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = SortState::by(field, direction);
        self
    }

    /// Page 0 is read as page 1.
    #[must_use]
    pub fn with_page(mut self, page: usize, per_page: Option<usize>) -> Self {
        self.page = page.max(1);
        self.per_page = normalize_page_size(per_page);
        self
    }

    /// Filter value currently applied to `field`, if any.
    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }
}

/// One page of a narrowed collection plus the numbers templates need.
#[derive(Clone, Debug, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Listing<T> {
    pub fn into_paginated(self) -> Paginated<T> {
        Paginated::new(self.items, self.page, self.total_pages, self.total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// String form of a scalar as used by search and filters. Containers have
/// none of their own.
fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether a scalar, or any scalar value nested inside a container,
/// contains `term`. Object keys never take part.
fn contains_term(value: &Value, term: &str) -> bool {
    match value {
        Value::Object(map) => map.values().any(|nested| contains_term(nested, term)),
        Value::Array(values) => values.iter().any(|nested| contains_term(nested, term)),
        scalar => coerce(scalar).is_some_and(|text| text.to_lowercase().contains(term)),
    }
}

/// Whether any own value of `item`, including the values of nested objects
/// and arrays, contains `term` ignoring case. An empty term matches
/// everything.
pub fn matches_search(item: &Value, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    contains_term(item, &term)
}

/// Looks up a dotted field path such as `assigned_to.email`.
pub fn field_value<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(item, |current, key| current.get(key))
        .filter(|value| !value.is_null())
}

/// All filters must match exactly (ignoring ASCII case).
pub fn matches_filters(item: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(field, expected)| {
        field_value(item, field)
            .and_then(coerce)
            .is_some_and(|actual| actual.trim().eq_ignore_ascii_case(expected))
    })
}

/// Comparable form of a field value.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Bool(bool),
    Number(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Timestamp(_) => 3,
            SortKey::Text(_) => 4,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Parses the timestamp shapes produced by serializing chrono values.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn sort_key(item: &Value, field: &str) -> SortKey {
    let Some(value) = field_value(item, field) else {
        return SortKey::Missing;
    };
    if field == CREATED_AT_FIELD {
        if let Some(ts) = value.as_str().and_then(parse_timestamp) {
            return SortKey::Timestamp(ts);
        }
    }
    match value {
        Value::Null => SortKey::Missing,
        Value::Bool(b) => SortKey::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(SortKey::Missing, SortKey::Number),
        Value::String(s) => SortKey::Text(s.to_lowercase()),
        other => SortKey::Text(other.to_string().to_lowercase()),
    }
}

/// Indices of `values` in display order.
///
/// Missing values come first ascending and last descending; equal keys
/// keep their original relative order in both directions.
pub fn sorted_indices(values: &[Value], sort: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    let Some(field) = sort.field.as_deref() else {
        return indices;
    };

    let keys: Vec<SortKey> = values.iter().map(|value| sort_key(value, field)).collect();
    match sort.direction {
        SortDirection::Asc => indices.sort_by(|&a, &b| keys[a].compare(&keys[b])),
        SortDirection::Desc => indices.sort_by(|&a, &b| keys[b].compare(&keys[a])),
    }
    indices
}

/// Slice of `items` for a 1-based page; a page past the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    let per_page = per_page.max(1);
    let start = (page.max(1) - 1).saturating_mul(per_page);
    items.iter().skip(start).take(per_page).cloned().collect()
}

/// Searches, filters, sorts and paginates `items` without touching them.
pub fn apply<T: Serialize + Clone>(items: &[T], params: &ListParams) -> Listing<T> {
    let values: Vec<Value> = items
        .iter()
        .map(|item| serde_json::to_value(item).unwrap_or(Value::Null))
        .collect();

    let kept: Vec<usize> = (0..items.len())
        .filter(|&i| {
            matches_search(&values[i], &params.search) && matches_filters(&values[i], &params.filters)
        })
        .collect();

    let kept_values: Vec<Value> = kept.iter().map(|&i| values[i].clone()).collect();
    let ordered: Vec<T> = sorted_indices(&kept_values, &params.sort)
        .into_iter()
        .map(|i| items[kept[i]].clone())
        .collect();

    let total = ordered.len();
    let total_pages = total.div_ceil(params.per_page.max(1));
    let page = params.page.max(1);

    Listing {
        items: paginate(&ordered, page, params.per_page),
        total,
        page,
        per_page: params.per_page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Clone, Debug, Serialize, PartialEq)]
    struct Row {
        id: i32,
        name: String,
        status: Option<String>,
        created_at: String,
        assigned_to: Option<Person>,
    }

    #[derive(Clone, Debug, Serialize, PartialEq)]
    struct Person {
        name: String,
        email: String,
    }

    fn row(id: i32, name: &str, status: Option<&str>, created_at: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
            status: status.map(str::to_string),
            created_at: created_at.to_string(),
            assigned_to: None,
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row(1, "Asha", Some("interested"), "2026-01-03T10:00:00"),
            row(2, "bharat", Some("interested"), "2026-01-01T09:00:00"),
            row(3, "Chitra", Some("rejected"), "2026-01-02T08:30:00"),
        ]
    }

    fn ids(items: &[Row]) -> Vec<i32> {
        items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn status_filter_keeps_matching_rows_in_order() {
        let params = ListParams::new().with_filter("status", "interested");
        let listing = apply(&rows(), &params);
        assert_eq!(ids(&listing.items), vec![1, 2]);
        assert_eq!(listing.total, 2);
    }

    #[test]
    fn empty_filter_value_means_all() {
        let params = ListParams::new().with_filter("status", "  ");
        assert!(params.filters.is_empty());
        assert_eq!(apply(&rows(), &params).total, 3);
    }

    #[test]
    fn search_is_case_insensitive_and_reaches_one_level_down() {
        let mut data = rows();
        data[2].assigned_to = Some(Person {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
        });

        let by_name = apply(&data, &ListParams::new().with_search("BHAR"));
        assert_eq!(ids(&by_name.items), vec![2]);

        let nested = apply(&data, &ListParams::new().with_search("ravi@"));
        assert_eq!(ids(&nested.items), vec![3]);

        let by_number = apply(&data, &ListParams::new().with_search("3"));
        assert!(ids(&by_number.items).contains(&3));
    }

    #[test]
    fn search_reads_nested_values_but_not_key_names() {
        let item = json!({"outer": {"inner": {"deep": "needle"}}});
        assert!(matches_search(&item, "needle"));
        assert!(!matches_search(&item, "deep"));
        let item = json!({"outer": {"inner": null}});
        assert!(!matches_search(&item, "null"));
    }

    #[test]
    fn search_does_not_match_keys_of_nested_records() {
        let rows = vec![
            json!({"id": 1, "remarks": [{"status": "new", "message": "hi"}]}),
            json!({"id": 2, "remarks": []}),
        ];
        let hits: Vec<&Value> = rows
            .iter()
            .filter(|row| matches_search(row, "message"))
            .collect();
        assert!(hits.is_empty());

        let hits: Vec<&Value> = rows.iter().filter(|row| matches_search(row, "HI")).collect();
        assert_eq!(hits, vec![&rows[0]]);
    }

    #[test]
    fn filtered_is_a_subset_of_source() {
        let data = rows();
        let terms = ["", "a", "int", "zzz", "2026", "rej"];
        let statuses = [None, Some("interested"), Some("rejected"), Some("new")];
        for term in terms {
            for status in statuses {
                let mut params = ListParams::new().with_search(term).with_page(1, Some(100));
                if let Some(status) = status {
                    params = params.with_filter("status", status);
                }
                let listing = apply(&data, &params);
                assert!(listing.items.iter().all(|item| data.contains(item)));
                assert!(listing.total <= data.len());
            }
        }
    }

    #[test]
    fn text_sort_ignores_case() {
        let params = ListParams::new().sorted_by("name", SortDirection::Asc);
        assert_eq!(ids(&apply(&rows(), &params).items), vec![1, 2, 3]);
    }

    #[test]
    fn created_at_sorts_chronologically_and_defaults_to_desc() {
        let params = ListParams::new().sorted_by("created_at", SortDirection::default());
        assert_eq!(ids(&apply(&rows(), &params).items), vec![1, 3, 2]);
    }

    #[test]
    fn created_at_accepts_date_only_values() {
        let data = vec![
            row(1, "a", None, "2026-01-02"),
            row(2, "b", None, "2026-01-01T23:59:59"),
        ];
        let params = ListParams::new().sorted_by("created_at", SortDirection::Asc);
        assert_eq!(ids(&apply(&data, &params).items), vec![2, 1]);
    }

    #[test]
    fn descending_reverses_ascending_for_distinct_keys() {
        let data = rows();
        for field in ["id", "name", "created_at"] {
            let asc = apply(&data, &ListParams::new().sorted_by(field, SortDirection::Asc));
            let desc = apply(&asc.items, &ListParams::new().sorted_by(field, SortDirection::Desc));
            let mut reversed = asc.items.clone();
            reversed.reverse();
            assert_eq!(desc.items, reversed, "{field}");
        }
    }

    #[test]
    fn missing_values_go_last_descending_and_first_ascending() {
        let data = vec![
            row(1, "a", Some("b"), "2026-01-01"),
            row(2, "b", None, "2026-01-01"),
            row(3, "c", Some("a"), "2026-01-01"),
        ];
        let desc = apply(&data, &ListParams::new().sorted_by("status", SortDirection::Desc));
        assert_eq!(ids(&desc.items), vec![1, 3, 2]);
        let asc = apply(&data, &ListParams::new().sorted_by("status", SortDirection::Asc));
        assert_eq!(ids(&asc.items), vec![2, 3, 1]);
    }

    #[test]
    fn sorting_is_stable() {
        let data = rows();
        let asc = apply(&data, &ListParams::new().sorted_by("status", SortDirection::Asc));
        assert_eq!(ids(&asc.items), vec![1, 2, 3]);
        let desc = apply(&data, &ListParams::new().sorted_by("status", SortDirection::Desc));
        assert_eq!(ids(&desc.items), vec![3, 1, 2]);
    }

    #[test]
    fn source_is_not_mutated() {
        let data = rows();
        let before = data.clone();
        let _ = apply(&data, &ListParams::new().sorted_by("name", SortDirection::Desc));
        assert_eq!(data, before);
    }

    #[test]
    fn pages_concatenate_to_the_filtered_collection() {
        let data: Vec<Row> = (1..=23)
            .map(|i| row(i, &format!("lead {i}"), Some("new"), "2026-01-01"))
            .collect();
        let full = apply(&data, &ListParams::new().with_page(1, Some(100)));

        let mut pages = Vec::new();
        let mut page = 1;
        loop {
            let listing = apply(&data, &ListParams::new().with_page(page, Some(10)));
            assert_eq!(listing.total_pages, 3);
            if listing.items.is_empty() {
                break;
            }
            pages.extend(listing.items);
            page += 1;
        }
        assert_eq!(page, 4);
        assert_eq!(pages, full.items);
    }

    #[test]
    fn page_zero_is_first_page_and_past_the_end_is_empty() {
        let data = rows();
        let params = ListParams::new().with_page(0, Some(10));
        assert_eq!(params.page, 1);
        assert_eq!(apply(&data, &params).items.len(), 3);
        assert!(paginate(&data, 5, 10).is_empty());
    }

    #[test]
    fn unsupported_page_size_falls_back_to_default() {
        assert_eq!(normalize_page_size(Some(25)), 25);
        assert_eq!(normalize_page_size(Some(7)), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn selecting_same_column_toggles_and_new_column_resets() {
        let state = SortState::default().select("name");
        assert_eq!(state, SortState::by("name", SortDirection::Desc));
        let state = state.select("name");
        assert_eq!(state.direction, SortDirection::Asc);
        let state = state.select("created_at");
        assert_eq!(state, SortState::by("created_at", SortDirection::Desc));
    }

    #[test]
    fn query_builds_params_with_filters() {
        let query = ListQuery {
            search: Some(" asha ".into()),
            sort: Some("name".into()),
            dir: Some(SortDirection::Asc),
            page: Some(0),
            per_page: Some(33),
        };
        let params = query.into_params([("status", Some("new".to_string())), ("call_status", None)]);
        assert_eq!(params.search, "asha");
        assert_eq!(params.filter("status"), Some("new"));
        assert_eq!(params.filter("call_status"), None);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(params.sort, SortState::by("name", SortDirection::Asc));
    }

    #[test]
    fn dotted_filter_paths_reach_nested_fields() {
        let item = json!({"assigned_to": {"email": "Sales@Example.com"}});
        let filters = vec![("assigned_to.email".to_string(), "sales@example.com".to_string())];
        assert!(matches_filters(&item, &filters));
        let missing = json!({"assigned_to": null});
        assert!(!matches_filters(&missing, &filters));
    }
}
