//! Workflows behind the JSON endpoints.

use crate::domain::lead::Lead;
use crate::domain::assignment::can_assign;
use crate::domain::role::Role;
use crate::domain::types::EmailAddress;
use crate::dto::api::{AssignableMember, IvrConfigData};
use crate::dto::leads::LeadFilters;
use crate::forms::leads::ImportLead;
use crate::ivr::SipConfig;
use crate::listing::{ListQuery, Listing};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{LeadReader, LeadWriter, TeamReader};
use crate::services::leads::search_leads;
use crate::services::team::list_assignable;
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Roles that get the calling widget.
pub const CALLING_ROLES: [Role; 4] = [Role::Admin, Role::Counsellor, Role::Telecaller, Role::Sales];

/// One page of the leads visible to `user`.
pub fn leads_json<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: LeadFilters,
) -> ServiceResult<Listing<Lead>>
where
    R: LeadReader + ?Sized,
{
    let params = query.into_params(filters.into_fields());
    search_leads(repo, user, &params)
}

/// Imports leads posted as JSON; the whole batch is rejected when any entry
/// is invalid.
pub fn import_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: Vec<ImportLead>,
) -> ServiceResult<usize>
where
    R: LeadWriter + ?Sized,
{
    if payload.is_empty() {
        return Err(ServiceError::Form("No leads to import".to_string()));
    }
    if !can_assign(&user.role()) && payload.iter().any(|lead| lead.assigned_to.is_some()) {
        log::warn!("User {} tried to assign leads on import", user.email);
        return Err(ServiceError::Unauthorized);
    }

    let created_by = EmailAddress::new(user.email.as_str())?;
    let new_leads = payload
        .into_iter()
        .enumerate()
        .map(|(index, lead)| {
            lead.into_new_lead(&created_by)
                .map_err(|err| ServiceError::Form(format!("Lead #{}: {err}", index + 1)))
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let created = repo.create_leads(&new_leads)?;
    log::info!("{} imported {created} leads", user.email);
    Ok(created)
}

pub fn assignable_members<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<AssignableMember>>
where
    R: TeamReader + ?Sized,
{
    let members = list_assignable(repo, user)?;
    Ok(members.iter().map(AssignableMember::from).collect())
}

/// Signalling settings for the calling widget.
pub fn ivr_config(user: &AuthenticatedUser, sip: &SipConfig) -> ServiceResult<IvrConfigData> {
    ensure_role(user, &CALLING_ROLES)?;

    if !sip.is_configured() {
        return Err(ServiceError::NotFound);
    }

    Ok(IvrConfigData {
        ws_url: sip.ws_url.clone(),
        uri: sip.uri.clone(),
        password: sip.password.clone(),
        display_name: sip.display_name.clone().or_else(|| Some(user.name.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with_role;

    fn import(json: &str) -> Vec<ImportLead> {
        serde_json::from_str(json).expect("valid json")
    }

    #[test]
    fn import_creates_all_leads() {
        let mut repo = MockRepository::new();
        repo.expect_create_leads()
            .withf(|leads| {
                leads.len() == 2
                    && leads[1]
                        .assigned_to
                        .as_ref()
                        .is_some_and(|a| a.email.as_str() == "ravi@example.com")
            })
            .returning(|leads| Ok(leads.len()));

        let payload = import(
            r#"[
                {"full_name": "Asha Verma", "product_company": "Amity"},
                {"full_name": "Kiran Rao", "product_company": "NMIMS",
                 "assigned_to": "ravi@example.com"}
            ]"#,
        );
        let created = import_leads(&repo, &user_with_role("admin"), payload).expect("imported");
        assert_eq!(created, 2);
    }

    #[test]
    fn telecaller_cannot_assign_on_import() {
        let mut repo = MockRepository::new();
        repo.expect_create_leads().times(0);

        let payload = import(
            r#"[{"full_name": "Kiran Rao", "product_company": "NMIMS",
                 "assigned_to": {"name": "Ravi", "email": "ravi@example.com"}}]"#,
        );
        assert!(matches!(
            import_leads(&repo, &user_with_role("telecaller"), payload),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn invalid_entry_names_its_position() {
        let mut repo = MockRepository::new();
        repo.expect_create_leads().times(0);

        let payload = import(
            r#"[{"full_name": "Asha Verma", "product_company": "Amity"},
                {"full_name": " ", "product_company": "Amity"}]"#,
        );
        match import_leads(&repo, &user_with_role("sales"), payload) {
            Err(ServiceError::Form(message)) => assert!(message.starts_with("Lead #2")),
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[test]
    fn ivr_config_requires_calling_role_and_settings() {
        let sip = SipConfig {
            ws_url: "wss://sip.example.com/ws".into(),
            uri: "sip:agent@sip.example.com".into(),
            password: "pw".into(),
            display_name: None,
        };

        let data = ivr_config(&user_with_role("telecaller"), &sip).expect("config");
        assert_eq!(data.display_name.as_deref(), Some("telecaller user"));

        assert!(matches!(
            ivr_config(&user_with_role("marketing"), &sip),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            ivr_config(&user_with_role("sales"), &SipConfig::default()),
            Err(ServiceError::NotFound)
        ));
    }
}
