//! Course enrollment workflows.

use crate::domain::assignment::can_assign;
use crate::domain::enrollment::Enrollment;
use crate::domain::role::Role;
use crate::domain::types::{EmailAddress, EnrollmentId, MemberId, StatusLabel};
use crate::dto::enrollments::{EnrollmentFilters, EnrollmentsPageData};
use crate::dto::{ListView, distinct_options};
use crate::forms::enrollments::{AddEnrollmentForm, AddEnrollmentPayload, EnrollmentStatusForm};
use crate::forms::leads::AssignForm;
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{EnrollmentReader, EnrollmentWriter, TeamReader};
use crate::services::team::{assignable_or_empty, resolve_assignee};
use crate::services::{ServiceError, ServiceResult, ensure_role};

fn visible_enrollment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: EnrollmentId,
) -> ServiceResult<Enrollment>
where
    R: EnrollmentReader + ?Sized,
{
    repo.get_enrollment_by_id(id)?
        .filter(|enrollment| enrollment.is_visible_to(&user.email, &user.role()))
        .ok_or(ServiceError::NotFound)
}

pub fn list_enrollments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: EnrollmentFilters,
) -> ServiceResult<EnrollmentsPageData>
where
    R: EnrollmentReader + TeamReader + ?Sized,
{
    let role = user.role();
    let enrollments: Vec<Enrollment> = repo
        .list_enrollments()?
        .into_iter()
        .filter(|enrollment| enrollment.is_visible_to(&user.email, &role))
        .collect();

    let params = query.into_params(filters.into_fields());
    let statuses = distinct_options(enrollments.iter().map(|e| e.status.as_str().to_string()));
    let courses = distinct_options(enrollments.iter().map(|e| e.course_name.as_str().to_string()));

    let listing = apply(&enrollments, &params);
    let view = ListView::new(&params, listing.total);

    Ok(EnrollmentsPageData {
        enrollments: listing.into_paginated(),
        view,
        statuses,
        courses,
        assignable: assignable_or_empty(repo, user)?,
        can_assign: can_assign(&role),
        can_delete: user.is_admin(),
    })
}

pub fn create_enrollment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddEnrollmentForm,
) -> ServiceResult<Enrollment>
where
    R: EnrollmentWriter + ?Sized,
{
    let payload = AddEnrollmentPayload::try_from(form)?;
    let new_enrollment = payload.into_domain(EmailAddress::new(user.email.as_str())?);

    repo.create_enrollment(&new_enrollment).map_err(|err| {
        log::error!("Failed to create enrollment: {err}");
        ServiceError::from(err)
    })
}

pub fn update_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    enrollment_id: i32,
    form: EnrollmentStatusForm,
) -> ServiceResult<Enrollment>
where
    R: EnrollmentReader + EnrollmentWriter + ?Sized,
{
    let status = StatusLabel::try_from(form)?;
    let enrollment = visible_enrollment(repo, user, EnrollmentId::new(enrollment_id)?)?;

    Ok(repo.update_enrollment_status(enrollment.id, &status)?)
}

pub fn assign_enrollment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    enrollment_id: i32,
    form: AssignForm,
) -> ServiceResult<Enrollment>
where
    R: EnrollmentReader + EnrollmentWriter + TeamReader + ?Sized,
{
    let member_id = MemberId::try_from(form)?;
    let enrollment = visible_enrollment(repo, user, EnrollmentId::new(enrollment_id)?)?;
    let assignee = resolve_assignee(repo, user, member_id)?;

    Ok(repo.assign_enrollment(enrollment.id, &assignee)?)
}

pub fn delete_enrollment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    enrollment_id: i32,
) -> ServiceResult<()>
where
    R: EnrollmentWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    repo.delete_enrollment(EnrollmentId::new(enrollment_id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::team_member::TeamMember;
    use crate::domain::types::{CourseName, PersonName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with_role;

    fn enrollment(id: i32, course: &str, created_by: &str) -> Enrollment {
        let now = Utc::now().naive_utc();
        Enrollment {
            id: EnrollmentId::new(id).expect("valid id"),
            student_name: PersonName::new("Student").expect("valid name"),
            student_email: EmailAddress::new("student@example.com").expect("valid email"),
            course_name: CourseName::new(course).expect("valid course"),
            status: StatusLabel::new("pending").expect("valid status"),
            assigned_to: None,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn course_filter_and_visibility_combine() {
        let mut repo = MockRepository::new();
        repo.expect_list_enrollments().returning(|| {
            Ok(vec![
                enrollment(1, "Online MBA", "counsellor@example.com"),
                enrollment(2, "Online MBA", "other@example.com"),
                enrollment(3, "BBA", "counsellor@example.com"),
            ])
        });
        repo.expect_list_members().returning(|| Ok(vec![]));

        let filters = EnrollmentFilters {
            course_name: Some("online mba".into()),
            status: None,
        };
        let data = list_enrollments(
            &repo,
            &user_with_role("counsellor"),
            ListQuery::default(),
            filters,
        )
        .expect("page");
        let ids: Vec<i32> = data.enrollments.items.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(data.courses, vec!["BBA", "Online MBA"]);
        assert!(data.can_assign);
        assert!(!data.can_delete);
    }

    #[test]
    fn counsellor_assigns_to_telecaller() {
        let mut repo = MockRepository::new();
        repo.expect_get_enrollment_by_id()
            .returning(|_| Ok(Some(enrollment(1, "BBA", "counsellor@example.com"))));
        repo.expect_list_members().returning(|| {
            Ok(vec![
                TeamMember::try_new(
                    9,
                    "Tara".into(),
                    "tara@example.com".into(),
                    "Telecaller".into(),
                    String::new(),
                    Utc::now().naive_utc(),
                )
                .expect("member"),
            ])
        });
        repo.expect_assign_enrollment()
            .withf(|_, assignee| assignee.email.as_str() == "tara@example.com")
            .returning(|id, assignee| {
                let mut updated = enrollment(id.get(), "BBA", "counsellor@example.com");
                updated.assigned_to = Some(assignee.clone());
                Ok(updated)
            });

        let updated = assign_enrollment(
            &repo,
            &user_with_role("counsellor"),
            1,
            AssignForm { member_id: 9 },
        )
        .expect("assigned");
        assert!(updated.assigned_to.is_some());
    }

    #[test]
    fn blank_status_is_rejected_before_lookup() {
        let mut repo = MockRepository::new();
        repo.expect_get_enrollment_by_id().times(0);

        let result = update_status(
            &repo,
            &user_with_role("admin"),
            1,
            EnrollmentStatusForm { status: " ".into() },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
