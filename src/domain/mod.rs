//! Domain aggregates exposed by the back-office service layer.

pub mod asset;
pub mod assignment;
pub mod content;
pub mod enrollment;
pub mod job_listing;
pub mod lead;
pub mod mail;
pub mod report;
pub mod role;
pub mod team_member;
pub mod types;
