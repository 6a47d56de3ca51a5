//! DTOs used by the team pages.

use serde::Serialize;

use crate::domain::lead::Lead;
use crate::domain::team_member::TeamMember;
use crate::dto::ListView;
use crate::pagination::Paginated;

/// Team table row: the member and how many leads are assigned to them.
#[derive(Clone, Debug, Serialize)]
pub struct MemberRow {
    #[serde(flatten)]
    pub member: TeamMember,
    pub assigned_leads: usize,
}

#[derive(Debug)]
pub struct TeamPageData {
    pub members: Paginated<MemberRow>,
    pub view: ListView,
    pub can_edit: bool,
}

#[derive(Debug)]
pub struct MemberDetailData {
    pub member: TeamMember,
    pub assigned_leads: Vec<Lead>,
}
