use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::mail::MailStatus;
use crate::dto::mail::MailFilters;
use crate::forms::mail::RecordMailForm;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::{ServiceError, mail as mail_service};

#[get("/mail")]
pub async fn mail(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
    filters: web::Query<MailFilters>,
) -> impl Responder {
    match mail_service::list_mail(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "mail");
            insert_list_query(&mut context, &request);
            context.insert("records", &data.records);
            context.insert("view", &data.view);
            context.insert("can_delete", &data.can_delete);

            render_template(&tera, "mail/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You are not allowed to do that.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list mail records: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/mail/add")]
pub async fn record_mail(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RecordMailForm>,
) -> impl Responder {
    match mail_service::record_mail(repo.get_ref(), &user, form) {
        Ok(record) => {
            FlashMessage::success(format!("Mail to {} recorded.", record.recipient)).send();
            redirect("/mail")
        }
        Err(err) => flash_error_redirect(err, "/mail", "record the mail"),
    }
}

fn mark(
    repo: &DieselRepository,
    user: &AuthenticatedUser,
    record_id: i32,
    status: MailStatus,
) -> HttpResponse {
    match mail_service::mark_mail(repo, user, record_id, status) {
        Ok(record) => {
            FlashMessage::success(format!("Mail marked as {}.", record.status)).send();
            redirect("/mail")
        }
        Err(err) => flash_error_redirect(err, "/mail", "update the mail"),
    }
}

#[post("/mail/{record_id}/opened")]
pub async fn mark_opened(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    mark(repo.get_ref(), &user, record_id.into_inner(), MailStatus::Opened)
}

#[post("/mail/{record_id}/bounced")]
pub async fn mark_bounced(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    mark(repo.get_ref(), &user, record_id.into_inner(), MailStatus::Bounced)
}

#[post("/mail/{record_id}/delete")]
pub async fn delete_mail(
    record_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match mail_service::delete_mail(repo.get_ref(), &user, record_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Mail record deleted.").send();
            redirect("/mail")
        }
        Err(err) => flash_error_redirect(err, "/mail", "delete the mail record"),
    }
}
