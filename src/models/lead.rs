use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, NewLead as DomainNewLead, NewRemark as DomainNewRemark,
    Remark as DomainRemark, UpdateLead as DomainUpdateLead,
};
use crate::domain::types::{
    EmailAddress, LeadId, PersonName, ProductCompany, RemarkId, SanitizedText, StatusLabel,
    TypeConstraintError,
};
use crate::models::assignee_from_columns;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub product_company: String,
    pub status: String,
    pub call_status: String,
    pub assigned_to_email: Option<String>,
    pub assigned_to_name: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone_no: Option<&'a str>,
    pub product_company: &'a str,
    pub status: &'a str,
    pub call_status: &'a str,
    pub assigned_to_email: Option<&'a str>,
    pub assigned_to_name: Option<&'a str>,
    pub created_by: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(treat_none_as_null = true)]
/// Data used when editing a [`Lead`] record.
pub struct UpdateLead<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone_no: Option<&'a str>,
    pub product_company: &'a str,
    pub status: &'a str,
    pub call_status: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::lead_remarks)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Remark {
    pub id: i32,
    pub lead_id: i32,
    pub status: String,
    pub message: String,
    pub reminder_date: Option<NaiveDateTime>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_remarks)]
pub struct NewRemark<'a> {
    pub lead_id: i32,
    pub status: &'a str,
    pub message: &'a str,
    pub reminder_date: Option<NaiveDateTime>,
    pub created_by: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::new(lead.id)?,
            full_name: PersonName::new(lead.full_name)?,
            email: lead
                .email
                .filter(|e| !e.trim().is_empty())
                .map(EmailAddress::new)
                .transpose()?,
            phone_no: lead.phone_no.filter(|p| !p.trim().is_empty()),
            product_company: ProductCompany::new(lead.product_company)?,
            status: StatusLabel::new(lead.status)?,
            call_status: StatusLabel::new(lead.call_status)?,
            assigned_to: assignee_from_columns(lead.assigned_to_name, lead.assigned_to_email)?,
            created_by: lead.created_by,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
            remarks: Vec::new(),
        })
    }
}

impl<'a> NewLead<'a> {
    pub fn from_domain(lead: &'a DomainNewLead, now: NaiveDateTime) -> Self {
        Self {
            full_name: lead.full_name.as_str(),
            email: lead.email.as_ref().map(|e| e.as_str()),
            phone_no: lead.phone_no.as_ref().map(|p| p.as_str()),
            product_company: lead.product_company.as_str(),
            status: lead.status.as_str(),
            call_status: lead.call_status.as_str(),
            assigned_to_email: lead.assigned_to.as_ref().map(|a| a.email.as_str()),
            assigned_to_name: lead
                .assigned_to
                .as_ref()
                .and_then(|a| a.name.as_ref())
                .map(|n| n.as_str()),
            created_by: lead.created_by.as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateLead<'a> {
    pub fn from_domain(lead: &'a DomainUpdateLead, now: NaiveDateTime) -> Self {
        Self {
            full_name: lead.full_name.as_str(),
            email: lead.email.as_ref().map(|e| e.as_str()),
            phone_no: lead.phone_no.as_ref().map(|p| p.as_str()),
            product_company: lead.product_company.as_str(),
            status: lead.status.as_str(),
            call_status: lead.call_status.as_str(),
            updated_at: now,
        }
    }
}

impl TryFrom<Remark> for DomainRemark {
    type Error = TypeConstraintError;

    fn try_from(remark: Remark) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RemarkId::new(remark.id)?,
            lead_id: LeadId::new(remark.lead_id)?,
            status: StatusLabel::new(remark.status)?,
            message: SanitizedText::new(remark.message)?,
            reminder_date: remark.reminder_date,
            created_by: remark.created_by,
            created_at: remark.created_at,
        })
    }
}

impl<'a> NewRemark<'a> {
    pub fn from_domain(remark: &'a DomainNewRemark, now: NaiveDateTime) -> Self {
        Self {
            lead_id: remark.lead_id.get(),
            status: remark.status.as_str(),
            message: remark.message.as_str(),
            reminder_date: remark.reminder_date,
            created_by: remark.created_by.as_str(),
            created_at: now,
        }
    }
}
