//! Forms for creating, editing, annotating and assigning leads.

use serde::Deserialize;
use validator::Validate;

use crate::domain::assignment::{Assignee, AssigneeInput};
use crate::domain::lead::{NewLead, UpdateLead};
use crate::domain::types::{
    EmailAddress, LeadId, MemberId, PersonName, PhoneNumber, ProductCompany, SanitizedText,
    StatusLabel,
};
use crate::forms::{FormError, non_blank, parse_datetime};

#[derive(Deserialize, Validate)]
/// Fields shared by the add and edit lead forms.
pub struct LeadForm {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[validate(length(min = 1))]
    pub product_company: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
}

/// Validated lead fields.
pub struct LeadPayload {
    pub full_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone_no: Option<PhoneNumber>,
    pub product_company: ProductCompany,
    pub status: Option<StatusLabel>,
    pub call_status: Option<StatusLabel>,
}

impl TryFrom<LeadForm> for LeadPayload {
    type Error = FormError;

    fn try_from(form: LeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = non_blank(form.email)
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone_no = non_blank(form.phone_no)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;
        let status = non_blank(form.status)
            .map(StatusLabel::new)
            .transpose()
            .map_err(|_| FormError::InvalidStatus)?;
        let call_status = non_blank(form.call_status)
            .map(StatusLabel::new)
            .transpose()
            .map_err(|_| FormError::InvalidStatus)?;

        Ok(Self {
            full_name: PersonName::new(form.full_name).map_err(|_| FormError::InvalidName)?,
            email,
            phone_no,
            product_company: ProductCompany::new(form.product_company)
                .map_err(|_| FormError::InvalidName)?,
            status,
            call_status,
        })
    }
}

impl LeadPayload {
    pub fn into_new_lead(self, created_by: EmailAddress) -> NewLead {
        let mut lead = NewLead::new(
            self.full_name,
            self.email,
            self.phone_no,
            self.product_company,
            created_by,
        );
        if let Some(status) = self.status {
            lead = lead.with_status(status);
        }
        if let Some(call_status) = self.call_status {
            lead = lead.with_call_status(call_status);
        }
        lead
    }

    /// Missing statuses keep the lead's current ones.
    pub fn into_update(self, current_status: StatusLabel, current_call: StatusLabel) -> UpdateLead {
        UpdateLead {
            full_name: self.full_name,
            email: self.email,
            phone_no: self.phone_no,
            product_company: self.product_company,
            status: self.status.unwrap_or(current_status),
            call_status: self.call_status.unwrap_or(current_call),
        }
    }
}

#[derive(Deserialize, Validate)]
/// Note (and optional new status) posted from the lead page.
pub struct AddRemarkForm {
    #[validate(length(min = 1))]
    pub status: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    #[serde(default)]
    pub reminder_date: Option<String>,
}

pub struct AddRemarkPayload {
    pub status: StatusLabel,
    pub message: SanitizedText,
    pub reminder_date: Option<chrono::NaiveDateTime>,
}

impl TryFrom<AddRemarkForm> for AddRemarkPayload {
    type Error = FormError;

    fn try_from(form: AddRemarkForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            status: StatusLabel::new(form.status).map_err(|_| FormError::InvalidStatus)?,
            message: SanitizedText::new(form.message).map_err(|_| FormError::InvalidText)?,
            reminder_date: non_blank(form.reminder_date)
                .map(|value| parse_datetime(&value))
                .transpose()?,
        })
    }
}

#[derive(Deserialize)]
/// Target member picked in a single-record assign form.
pub struct AssignForm {
    pub member_id: i32,
}

impl TryFrom<AssignForm> for MemberId {
    type Error = FormError;

    fn try_from(form: AssignForm) -> Result<Self, Self::Error> {
        MemberId::new(form.member_id).map_err(|_| FormError::InvalidId)
    }
}

#[derive(Deserialize)]
/// Bulk assignment: one `member_id` and a repeated `lead_ids` key.
pub struct BulkAssignForm {
    pub member_id: i32,
    #[serde(default)]
    pub lead_ids: Vec<i32>,
}

pub struct BulkAssignPayload {
    pub member_id: MemberId,
    pub lead_ids: Vec<LeadId>,
}

impl BulkAssignForm {
    /// Parses the raw urlencoded body; checkbox lists repeat the same key.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }
}

impl TryFrom<BulkAssignForm> for BulkAssignPayload {
    type Error = FormError;

    fn try_from(form: BulkAssignForm) -> Result<Self, Self::Error> {
        if form.lead_ids.is_empty() {
            return Err(FormError::EmptySelection);
        }
        let lead_ids = form
            .lead_ids
            .into_iter()
            .map(|id| LeadId::new(id).map_err(|_| FormError::InvalidId))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            member_id: MemberId::new(form.member_id).map_err(|_| FormError::InvalidId)?,
            lead_ids,
        })
    }
}

#[derive(Debug, Deserialize)]
/// One lead in a JSON import. `assigned_to` may be an email or `{name, email}`.
pub struct ImportLead {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    pub product_company: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<AssigneeInput>,
}

impl ImportLead {
    pub fn into_new_lead(self, created_by: &EmailAddress) -> Result<NewLead, FormError> {
        let assignee = self
            .assigned_to
            .map(Assignee::try_from)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;

        let payload = LeadPayload::try_from(LeadForm {
            full_name: self.full_name,
            email: self.email,
            phone_no: self.phone_no,
            product_company: self.product_company,
            status: self.status,
            call_status: self.call_status,
        })?;

        let lead = payload.into_new_lead(created_by.clone());
        Ok(match assignee {
            Some(assignee) => lead.assigned_to(assignee),
            None => lead,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> LeadForm {
        LeadForm {
            full_name: " Asha Verma ".into(),
            email: Some("".into()),
            phone_no: Some("98765 43210".into()),
            product_company: "Elite MBA".into(),
            status: Some("Interested".into()),
            call_status: None,
        }
    }

    #[test]
    fn lead_form_normalizes_values() {
        let payload = LeadPayload::try_from(form()).expect("valid form");
        assert_eq!(payload.full_name.as_str(), "Asha Verma");
        assert!(payload.email.is_none());
        assert_eq!(payload.phone_no.expect("phone").as_str(), "+919876543210");

        let created_by = EmailAddress::new("maker@example.com").expect("email");
        let lead = LeadPayload::try_from(form())
            .expect("valid form")
            .into_new_lead(created_by);
        assert_eq!(lead.status.as_str(), "interested");
        assert_eq!(lead.call_status.as_str(), "pending");
    }

    #[test]
    fn lead_form_rejects_bad_email() {
        let mut form = form();
        form.email = Some("not-an-email".into());
        assert!(matches!(
            LeadPayload::try_from(form),
            Err(FormError::InvalidEmail)
        ));
    }

    #[test]
    fn bulk_assign_reads_repeated_keys() {
        let form = BulkAssignForm::from_bytes(b"member_id=4&lead_ids=1&lead_ids=7").expect("parse");
        let payload = BulkAssignPayload::try_from(form).expect("valid");
        assert_eq!(payload.member_id.get(), 4);
        assert_eq!(
            payload.lead_ids.iter().map(|id| id.get()).collect::<Vec<_>>(),
            vec![1, 7]
        );

        let empty = BulkAssignForm::from_bytes(b"member_id=4").expect("parse");
        assert!(matches!(
            BulkAssignPayload::try_from(empty),
            Err(FormError::EmptySelection)
        ));
    }

    #[test]
    fn import_accepts_both_assignee_shapes() {
        let created_by = EmailAddress::new("api@example.com").expect("email");
        let leads: Vec<ImportLead> = serde_json::from_str(
            r#"[
                {"full_name": "A", "product_company": "Elite", "assigned_to": "s@example.com"},
                {"full_name": "B", "product_company": "Elite",
                 "assigned_to": {"name": "Sam", "email": "S@example.com"}}
            ]"#,
        )
        .expect("json");
        let leads = leads
            .into_iter()
            .map(|lead| lead.into_new_lead(&created_by))
            .collect::<Result<Vec<_>, _>>()
            .expect("valid leads");
        assert_eq!(
            leads[0].assigned_to.as_ref().map(|a| a.email.as_str()),
            Some("s@example.com")
        );
        assert_eq!(
            leads[1].assigned_to.as_ref().map(|a| a.display_name()),
            Some("Sam")
        );
    }

    #[test]
    fn remark_reminder_is_optional() {
        let payload = AddRemarkPayload::try_from(AddRemarkForm {
            status: "Follow Up".into(),
            message: "Call after exams".into(),
            reminder_date: Some(" ".into()),
        })
        .expect("valid");
        assert_eq!(payload.status.as_str(), "follow up");
        assert!(payload.reminder_date.is_none());
    }
}
