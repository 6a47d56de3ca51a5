//! Team administration and the assignment-target lookup shared by leads and
//! enrollments.

use crate::domain::assignment::{Assignee, assignable_members, can_assign};
use crate::domain::role::Role;
use crate::domain::team_member::{NewTeamMember, TeamMember};
use crate::domain::types::{EmailAddress, MemberId};
use crate::dto::ListView;
use crate::dto::team::{MemberDetailData, MemberRow, TeamPageData};
use crate::forms::team::{AddMemberForm, AddMemberPayload};
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{LeadReader, TeamReader, TeamWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

const TEAM_READ_ROLES: [Role; 2] = [Role::Admin, Role::Manager];

/// Members the current user may hand work to.
///
/// Telecallers have no assignment capability at all.
pub fn list_assignable<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<TeamMember>>
where
    R: TeamReader + ?Sized,
{
    let role = user.role();
    if !can_assign(&role) {
        return Err(ServiceError::Unauthorized);
    }

    let members = repo.list_members()?;
    Ok(assignable_members(&role, &members)
        .into_iter()
        .cloned()
        .collect())
}

/// Resolves `member_id` into an assignee, rejecting members outside the
/// user's assignable set.
pub(crate) fn resolve_assignee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    member_id: MemberId,
) -> ServiceResult<Assignee>
where
    R: TeamReader + ?Sized,
{
    list_assignable(repo, user)?
        .iter()
        .find(|member| member.id == member_id)
        .map(Assignee::from)
        .ok_or_else(|| {
            log::warn!(
                "User {} tried to assign work to member {member_id}",
                user.email
            );
            ServiceError::Form("This member cannot be assigned by you".to_string())
        })
}

/// Assignment controls are shown only to roles that may assign.
pub(crate) fn assignable_or_empty<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<TeamMember>>
where
    R: TeamReader + ?Sized,
{
    match list_assignable(repo, user) {
        Err(ServiceError::Unauthorized) => Ok(Vec::new()),
        other => other,
    }
}

/// Loads the team table with the number of leads assigned to each member.
pub fn list_team<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<TeamPageData>
where
    R: TeamReader + LeadReader + ?Sized,
{
    ensure_role(user, &TEAM_READ_ROLES)?;

    let members = repo.list_members()?;
    let leads = repo.list_leads()?;

    let rows: Vec<MemberRow> = members
        .into_iter()
        .map(|member| {
            let assigned_leads = leads
                .iter()
                .filter(|lead| {
                    lead.assigned_to
                        .as_ref()
                        .is_some_and(|assignee| assignee.email == member.email)
                })
                .count();
            MemberRow {
                member,
                assigned_leads,
            }
        })
        .collect();

    let params = query.into_unfiltered_params();
    let listing = apply(&rows, &params);
    let view = ListView::new(&params, listing.total);

    Ok(TeamPageData {
        members: listing.into_paginated(),
        view,
        can_edit: user.is_admin(),
    })
}

/// Loads one member together with the leads assigned to them.
pub fn show_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    member_id: i32,
) -> ServiceResult<MemberDetailData>
where
    R: TeamReader + LeadReader + ?Sized,
{
    ensure_role(user, &TEAM_READ_ROLES)?;

    let member = repo
        .get_member_by_id(MemberId::new(member_id)?)?
        .ok_or(ServiceError::NotFound)?;
    let assigned_leads = repo.list_leads_assigned_to(&member.email)?;

    Ok(MemberDetailData {
        member,
        assigned_leads,
    })
}

pub fn hash_password(password: &str) -> ServiceResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal("could not hash password".to_string())
    })
}

/// Validates the form and stores the member with a bcrypt password hash.
pub fn add_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddMemberForm,
) -> ServiceResult<TeamMember>
where
    R: TeamWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    let payload = AddMemberPayload::try_from(form)?;
    let password_hash = hash_password(&payload.password)?;
    let new_member =
        NewTeamMember::new(payload.name, payload.email, payload.role, password_hash);

    repo.create_member(&new_member).map_err(|err| {
        log::error!("Failed to add team member {}: {err}", new_member.email);
        ServiceError::from(err)
    })
}

pub fn delete_member<R>(repo: &R, user: &AuthenticatedUser, member_id: i32) -> ServiceResult<()>
where
    R: TeamReader + TeamWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    let member_id = MemberId::new(member_id)?;
    let member = repo
        .get_member_by_id(member_id)?
        .ok_or(ServiceError::NotFound)?;

    if EmailAddress::new(user.email.as_str())? == member.email {
        return Err(ServiceError::Form(
            "You cannot remove your own account".to_string(),
        ));
    }

    repo.delete_member(member_id)?;
    Ok(())
}
