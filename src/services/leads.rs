//! Lead pipeline workflows.

use crate::domain::assignment::can_assign;
use crate::domain::lead::{Lead, NewRemark, Remark};
use crate::domain::role::Role;
use crate::domain::types::{EmailAddress, LeadId, MemberId};
use crate::dto::leads::{LeadDetailData, LeadFilters, LeadsPageData};
use crate::dto::{ListView, distinct_options};
use crate::forms::leads::{
    AddRemarkForm, AddRemarkPayload, AssignForm, BulkAssignForm, BulkAssignPayload, LeadForm,
    LeadPayload,
};
use crate::listing::{ListParams, ListQuery, Listing, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{LeadReader, LeadWriter, TeamReader};
use crate::services::team::{assignable_or_empty, resolve_assignee};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Leads the user may see: everything for admins and managers, otherwise
/// what they created or what is assigned to them.
pub(crate) fn visible_leads<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Lead>>
where
    R: LeadReader + ?Sized,
{
    let role = user.role();
    let leads = repo.list_leads()?;
    if role.sees_everything() {
        return Ok(leads);
    }
    Ok(leads
        .into_iter()
        .filter(|lead| lead.is_visible_to(&user.email, &role))
        .collect())
}

/// Narrows the visible leads with the list parameters.
pub fn search_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<Listing<Lead>>
where
    R: LeadReader + ?Sized,
{
    let leads = visible_leads(repo, user)?;
    Ok(apply(&leads, params))
}

pub fn list_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: LeadFilters,
) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + TeamReader + ?Sized,
{
    let leads = visible_leads(repo, user)?;
    let params = query.into_params(filters.into_fields());

    let statuses = distinct_options(leads.iter().map(|l| l.status.as_str().to_string()));
    let call_statuses = distinct_options(leads.iter().map(|l| l.call_status.as_str().to_string()));
    let companies = distinct_options(leads.iter().map(|l| l.product_company.as_str().to_string()));

    let listing = apply(&leads, &params);
    let view = ListView::new(&params, listing.total);

    Ok(LeadsPageData {
        leads: listing.into_paginated(),
        view,
        statuses,
        call_statuses,
        companies,
        assignable: assignable_or_empty(repo, user)?,
        can_assign: can_assign(&user.role()),
        can_delete: user.is_admin(),
    })
}

/// Loads a lead the user can see, or `NotFound`.
fn visible_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: LeadId) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    repo.get_lead_by_id(lead_id)?
        .filter(|lead| lead.is_visible_to(&user.email, &user.role()))
        .ok_or(ServiceError::NotFound)
}

pub fn show_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: i32) -> ServiceResult<LeadDetailData>
where
    R: LeadReader + TeamReader + ?Sized,
{
    let lead = visible_lead(repo, user, LeadId::new(lead_id)?)?;
    let remarks = lead.remarks.clone();

    Ok(LeadDetailData {
        lead,
        remarks,
        assignable: assignable_or_empty(repo, user)?,
        can_assign: can_assign(&user.role()),
        can_delete: user.is_admin(),
    })
}

pub fn create_lead<R>(repo: &R, user: &AuthenticatedUser, form: LeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let payload = LeadPayload::try_from(form)?;
    let new_lead = payload.into_new_lead(EmailAddress::new(user.email.as_str())?);

    repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Failed to create lead: {err}");
        ServiceError::from(err)
    })
}

pub fn update_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: LeadForm,
) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let payload = LeadPayload::try_from(form)?;
    let lead = visible_lead(repo, user, LeadId::new(lead_id)?)?;
    let updates = payload.into_update(lead.status, lead.call_status);

    Ok(repo.update_lead(lead.id, &updates)?)
}

/// Stores a remark; the lead moves to the remark's status.
pub fn add_remark<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: AddRemarkForm,
) -> ServiceResult<Remark>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let payload = AddRemarkPayload::try_from(form)?;
    let lead = visible_lead(repo, user, LeadId::new(lead_id)?)?;

    let remark = NewRemark {
        lead_id: lead.id,
        status: payload.status,
        message: payload.message,
        reminder_date: payload.reminder_date,
        created_by: EmailAddress::new(user.email.as_str())?,
    };

    Ok(repo.add_remark(&remark)?)
}

pub fn assign_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: AssignForm,
) -> ServiceResult<()>
where
    R: LeadReader + LeadWriter + TeamReader + ?Sized,
{
    let member_id = MemberId::try_from(form)?;
    let lead = visible_lead(repo, user, LeadId::new(lead_id)?)?;
    let assignee = resolve_assignee(repo, user, member_id)?;

    repo.assign_leads(&[lead.id], &assignee)?;
    log::info!(
        "{} assigned lead {} to {}",
        user.email,
        lead.id,
        assignee.email
    );
    Ok(())
}

/// Assigns every selected lead to one member in a single transaction.
pub fn assign_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BulkAssignForm,
) -> ServiceResult<usize>
where
    R: LeadReader + LeadWriter + TeamReader + ?Sized,
{
    let payload = BulkAssignPayload::try_from(form)?;
    let assignee = resolve_assignee(repo, user, payload.member_id)?;

    let visible: Vec<LeadId> = visible_leads(repo, user)?
        .into_iter()
        .map(|lead| lead.id)
        .collect();
    if let Some(missing) = payload.lead_ids.iter().find(|id| !visible.contains(id)) {
        log::warn!("User {} cannot assign lead {missing}", user.email);
        return Err(ServiceError::NotFound);
    }

    let count = repo.assign_leads(&payload.lead_ids, &assignee)?;
    log::info!("{} assigned {count} leads to {}", user.email, assignee.email);
    Ok(count)
}

pub fn delete_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: i32) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    repo.delete_lead(LeadId::new(lead_id)?)?;
    log::info!("{} deleted lead {lead_id}", user.email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::assignment::Assignee;
    use crate::domain::team_member::TeamMember;
    use crate::domain::types::{PersonName, ProductCompany, StatusLabel};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with_role;

    fn lead(id: i32, status: &str, created_by: &str, assignee: Option<&str>) -> Lead {
        let now = Utc::now().naive_utc();
        Lead {
            id: LeadId::new(id).expect("valid id"),
            full_name: PersonName::new(format!("Lead {id}")).expect("valid name"),
            email: None,
            phone_no: None,
            product_company: ProductCompany::new("Elite MBA").expect("valid company"),
            status: StatusLabel::new(status).expect("valid status"),
            call_status: StatusLabel::new("pending").expect("valid status"),
            assigned_to: assignee
                .map(|email| Assignee::try_new(None, email.to_string()).expect("assignee")),
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
            remarks: Vec::new(),
        }
    }

    fn member(id: i32, role: &str) -> TeamMember {
        TeamMember::try_new(
            id,
            format!("Member {id}"),
            format!("member{id}@example.com"),
            role.to_string(),
            String::new(),
            Utc::now().naive_utc(),
        )
        .expect("valid member")
    }

    fn three_leads() -> Vec<Lead> {
        vec![
            lead(1, "interested", "admin@example.com", Some("sales@example.com")),
            lead(2, "interested", "sales@example.com", None),
            lead(3, "rejected", "admin@example.com", None),
        ]
    }

    #[test]
    fn status_filter_keeps_matching_leads_in_order() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads().returning(|| Ok(three_leads()));
        repo.expect_list_members().returning(|| Ok(vec![]));

        let filters = LeadFilters {
            status: Some("interested".into()),
            ..LeadFilters::default()
        };
        let data = list_leads(&repo, &user_with_role("admin"), ListQuery::default(), filters)
            .expect("leads page");
        let ids: Vec<i32> = data.leads.items.iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(data.statuses, vec!["interested", "rejected"]);
        assert!(data.can_delete);
    }

    #[test]
    fn sales_see_only_their_leads() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads().returning(|| Ok(three_leads()));

        let leads = visible_leads(&repo, &user_with_role("sales")).expect("visible");
        let mut ids: Vec<i32> = leads.iter().map(|l| l.id.get()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn hidden_lead_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_| Ok(Some(lead(3, "new", "admin@example.com", None))));

        assert!(matches!(
            show_lead(&repo, &user_with_role("telecaller"), 3),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn assignment_uses_member_name_and_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_| Ok(Some(lead(1, "new", "admin@example.com", None))));
        repo.expect_list_members()
            .returning(|| Ok(vec![member(5, "sales"), member(6, "admin")]));
        repo.expect_assign_leads()
            .withf(|ids, assignee| {
                ids.len() == 1
                    && assignee.email.as_str() == "member5@example.com"
                    && assignee.display_name() == "Member 5"
            })
            .times(1)
            .returning(|ids, _| Ok(ids.len()));

        assign_lead(
            &repo,
            &user_with_role("admin"),
            1,
            AssignForm { member_id: 5 },
        )
        .expect("assigned");
    }

    #[test]
    fn telecaller_cannot_assign() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_| Ok(Some(lead(1, "new", "telecaller@example.com", None))));
        repo.expect_assign_leads().times(0);

        assert!(matches!(
            assign_lead(
                &repo,
                &user_with_role("telecaller"),
                1,
                AssignForm { member_id: 5 }
            ),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn bulk_assign_rejects_invisible_leads() {
        let mut repo = MockRepository::new();
        repo.expect_list_members().returning(|| Ok(vec![member(5, "sales")]));
        repo.expect_list_leads().returning(|| Ok(three_leads()));
        repo.expect_assign_leads().times(0);

        let form = BulkAssignForm {
            member_id: 5,
            lead_ids: vec![1, 3],
        };
        assert!(matches!(
            assign_leads(&repo, &user_with_role("sales"), form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn only_admin_deletes() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead().times(0);
        assert!(matches!(
            delete_lead(&repo, &user_with_role("manager"), 1),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn remark_is_recorded_by_current_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_| Ok(Some(lead(2, "new", "sales@example.com", None))));
        repo.expect_add_remark()
            .withf(|remark| {
                remark.created_by.as_str() == "sales@example.com"
                    && remark.status.as_str() == "callback"
            })
            .returning(|remark| {
                Ok(Remark {
                    id: crate::domain::types::RemarkId::new(1).expect("id"),
                    lead_id: remark.lead_id,
                    status: remark.status.clone(),
                    message: remark.message.clone(),
                    reminder_date: remark.reminder_date,
                    created_by: remark.created_by.as_str().to_string(),
                    created_at: Utc::now().naive_utc(),
                })
            });

        let remark = add_remark(
            &repo,
            &user_with_role("sales"),
            2,
            AddRemarkForm {
                status: "Callback".into(),
                message: "Asked to call on Monday".into(),
                reminder_date: Some("2026-03-02T10:00".into()),
            },
        )
        .expect("remark");
        assert!(remark.reminder_date.is_some());
    }
}
