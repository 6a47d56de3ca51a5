//! DTOs used by the lead pages.

use serde::Deserialize;

use crate::domain::lead::{Lead, Remark};
use crate::domain::team_member::TeamMember;
use crate::dto::ListView;
use crate::pagination::Paginated;

/// Dropdown filters of the leads table.
#[derive(Debug, Default, Deserialize)]
pub struct LeadFilters {
    pub status: Option<String>,
    pub call_status: Option<String>,
    pub product_company: Option<String>,
    /// Assignee email.
    pub assigned_to: Option<String>,
}

impl LeadFilters {
    /// Pairs each filter with the lead field it matches against.
    pub fn into_fields(self) -> [(&'static str, Option<String>); 4] {
        [
            ("status", self.status),
            ("call_status", self.call_status),
            ("product_company", self.product_company),
            ("assigned_to.email", self.assigned_to),
        ]
    }
}

#[derive(Debug)]
pub struct LeadsPageData {
    pub leads: Paginated<Lead>,
    pub view: ListView,
    pub statuses: Vec<String>,
    pub call_statuses: Vec<String>,
    pub companies: Vec<String>,
    /// Empty when the user may not assign.
    pub assignable: Vec<TeamMember>,
    pub can_assign: bool,
    pub can_delete: bool,
}

#[derive(Debug)]
pub struct LeadDetailData {
    pub lead: Lead,
    pub remarks: Vec<Remark>,
    pub assignable: Vec<TeamMember>,
    pub can_assign: bool,
    pub can_delete: bool,
}
