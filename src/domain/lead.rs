use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::assignment::Assignee;
use crate::domain::role::Role;
use crate::domain::types::{
    EmailAddress, LeadId, PersonName, PhoneNumber, ProductCompany, RemarkId, SanitizedText,
    StatusLabel,
};

/// Status given to leads created without an explicit one.
pub const DEFAULT_LEAD_STATUS: &str = "new";
/// Call status given to leads nobody has called yet.
pub const DEFAULT_CALL_STATUS: &str = "pending";

/// A prospective customer tracked through the sales pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub full_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone_no: Option<String>,
    pub product_company: ProductCompany,
    pub status: StatusLabel,
    pub call_status: StatusLabel,
    pub assigned_to: Option<Assignee>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Newest first.
    #[serde(default)]
    pub remarks: Vec<Remark>,
}

impl Lead {
    /// Leads are visible to admins and managers, to their assignee and to
    /// whoever created them.
    pub fn is_visible_to(&self, email: &str, role: &Role) -> bool {
        role.sees_everything()
            || self.created_by.eq_ignore_ascii_case(email)
            || self
                .assigned_to
                .as_ref()
                .is_some_and(|assignee| assignee.email.as_str().eq_ignore_ascii_case(email))
    }
}

#[derive(Clone, Debug)]
pub struct NewLead {
    pub full_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone_no: Option<PhoneNumber>,
    pub product_company: ProductCompany,
    pub status: StatusLabel,
    pub call_status: StatusLabel,
    pub assigned_to: Option<Assignee>,
    pub created_by: EmailAddress,
}

impl NewLead {
    /// Builds a new lead with default pipeline statuses.
    #[must_use]
    pub fn new(
        full_name: PersonName,
        email: Option<EmailAddress>,
        phone_no: Option<PhoneNumber>,
        product_company: ProductCompany,
        created_by: EmailAddress,
    ) -> Self {
        Self {
            full_name,
            email,
            phone_no,
            product_company,
            status: StatusLabel::from_static(DEFAULT_LEAD_STATUS),
            call_status: StatusLabel::from_static(DEFAULT_CALL_STATUS),
            assigned_to: None,
            created_by,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusLabel) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_call_status(mut self, call_status: StatusLabel) -> Self {
        self.call_status = call_status;
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, assignee: Assignee) -> Self {
        self.assigned_to = Some(assignee);
        self
    }
}

#[derive(Clone, Debug)]
pub struct UpdateLead {
    pub full_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone_no: Option<PhoneNumber>,
    pub product_company: ProductCompany,
    pub status: StatusLabel,
    pub call_status: StatusLabel,
}

/// Timestamped note attached to a lead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Remark {
    pub id: RemarkId,
    pub lead_id: LeadId,
    pub status: StatusLabel,
    pub message: SanitizedText,
    pub reminder_date: Option<NaiveDateTime>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewRemark {
    pub lead_id: LeadId,
    pub status: StatusLabel,
    pub message: SanitizedText,
    pub reminder_date: Option<NaiveDateTime>,
    pub created_by: EmailAddress,
}
