use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::enrollments::EnrollmentFilters;
use crate::forms::enrollments::{AddEnrollmentForm, EnrollmentStatusForm};
use crate::forms::leads::AssignForm;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::enrollments as enrollments_service;

#[get("/enrollments")]
pub async fn enrollments(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
    filters: web::Query<EnrollmentFilters>,
) -> impl Responder {
    match enrollments_service::list_enrollments(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "enrollments");
            insert_list_query(&mut context, &request);
            context.insert("enrollments", &data.enrollments);
            context.insert("view", &data.view);
            context.insert("statuses", &data.statuses);
            context.insert("courses", &data.courses);
            context.insert("assignable", &data.assignable);
            context.insert("can_assign", &data.can_assign);
            context.insert("can_delete", &data.can_delete);

            render_template(&tera, "enrollments/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list enrollments: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/enrollments/add")]
pub async fn add_enrollment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddEnrollmentForm>,
) -> impl Responder {
    match enrollments_service::create_enrollment(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Enrollment added.").send();
            redirect("/enrollments")
        }
        Err(err) => flash_error_redirect(err, "/enrollments", "add the enrollment"),
    }
}

#[post("/enrollments/{enrollment_id}/status")]
pub async fn update_status(
    enrollment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EnrollmentStatusForm>,
) -> impl Responder {
    match enrollments_service::update_status(repo.get_ref(), &user, enrollment_id.into_inner(), form)
    {
        Ok(enrollment) => {
            FlashMessage::success(format!("Status set to {}.", enrollment.status)).send();
            redirect("/enrollments")
        }
        Err(err) => flash_error_redirect(err, "/enrollments", "update the enrollment"),
    }
}

#[post("/enrollments/{enrollment_id}/assign")]
pub async fn assign_enrollment(
    enrollment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AssignForm>,
) -> impl Responder {
    match enrollments_service::assign_enrollment(
        repo.get_ref(),
        &user,
        enrollment_id.into_inner(),
        form,
    ) {
        Ok(_) => {
            FlashMessage::success("Enrollment assigned.").send();
            redirect("/enrollments")
        }
        Err(err) => flash_error_redirect(err, "/enrollments", "assign the enrollment"),
    }
}

#[post("/enrollments/{enrollment_id}/delete")]
pub async fn delete_enrollment(
    enrollment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match enrollments_service::delete_enrollment(repo.get_ref(), &user, enrollment_id.into_inner())
    {
        Ok(()) => {
            FlashMessage::success("Enrollment deleted.").send();
            redirect("/enrollments")
        }
        Err(err) => flash_error_redirect(err, "/enrollments", "delete the enrollment"),
    }
}
