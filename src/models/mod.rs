//! Database models backing the back-office repository.

use crate::domain::assignment::Assignee;
use crate::domain::types::TypeConstraintError;

pub mod asset;
#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod content;
pub mod enrollment;
pub mod job_listing;
pub mod lead;
pub mod mail;
pub mod report;
pub mod team_member;

/// Rebuilds an assignee from the pair of nullable columns that store it.
pub(crate) fn assignee_from_columns(
    name: Option<String>,
    email: Option<String>,
) -> Result<Option<Assignee>, TypeConstraintError> {
    match email {
        Some(email) if !email.trim().is_empty() => {
            let name = name.filter(|n| !n.trim().is_empty());
            Assignee::try_new(name, email).map(Some)
        }
        _ => Ok(None),
    }
}
