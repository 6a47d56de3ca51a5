//! HTTP handlers and the helpers they share.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::role::Role;
use crate::middleware::RedirectUnauthorized;
use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;
use crate::services::api::CALLING_ROLES;

pub mod api;
pub mod auth;
pub mod content;
pub mod enrollments;
pub mod files;
pub mod jobs;
pub mod leads;
pub mod mail;
pub mod reports;
pub mod team;

/// Registers every handler. HTML pages sit behind [`RedirectUnauthorized`];
/// the JSON API answers 401 instead.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::signin)
        .service(auth::login)
        .service(
            web::scope("/api")
                .service(api::api_v1_leads)
                .service(api::api_v1_import_leads)
                .service(api::api_v1_assignable)
                .service(api::api_v1_ivr_config)
                .service(api::api_v1_download),
        )
        .service(
            web::scope("")
                .wrap(RedirectUnauthorized)
                .service(leads::index)
                .service(leads::leads)
                .service(leads::add_lead)
                .service(leads::assign_leads)
                .service(leads::show_lead)
                .service(leads::edit_lead)
                .service(leads::add_remark)
                .service(leads::assign_lead)
                .service(leads::delete_lead)
                .service(enrollments::enrollments)
                .service(enrollments::add_enrollment)
                .service(enrollments::update_status)
                .service(enrollments::assign_enrollment)
                .service(enrollments::delete_enrollment)
                .service(team::team)
                .service(team::add_member)
                .service(team::show_member)
                .service(team::delete_member)
                .service(jobs::jobs)
                .service(jobs::upload_csv)
                .service(jobs::upload_json)
                .service(jobs::delete_job)
                .service(files::files)
                .service(files::add_file)
                .service(files::delete_file)
                .service(reports::reports)
                .service(reports::submit_report)
                .service(reports::show_report)
                .service(content::seo)
                .service(content::add_seo)
                .service(content::edit_seo)
                .service(content::delete_seo)
                .service(content::blog)
                .service(content::add_post)
                .service(content::toggle_publish)
                .service(content::delete_post)
                .service(mail::mail)
                .service(mail::record_mail)
                .service(mail::mark_opened)
                .service(mail::mark_bounced)
                .service(mail::delete_mail)
                .service(auth::logout),
        );
}

/// Maps a flash level to the Bootstrap alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context every authenticated page starts from: alerts, the current user and
/// which navigation entries to show.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("is_admin", &user.is_admin());
    context.insert(
        "can_see_team",
        &user.has_any_role(&[Role::Admin, Role::Manager]),
    );
    context.insert(
        "can_edit_content",
        &user.has_any_role(&[Role::Admin, Role::Marketing]),
    );
    context.insert(
        "can_track_mail",
        &user.has_any_role(&[Role::Admin, Role::Marketing, Role::Sales]),
    );
    context.insert("can_call", &user.has_any_role(&CALLING_ROLES));
    context
}

/// Query string of `request` without the `drop` keys, for links that change
/// only those keys.
pub fn query_without(request: &HttpRequest, drop: &[&str]) -> String {
    let pairs: Vec<(String, String)> =
        serde_html_form::from_str(request.query_string()).unwrap_or_default();
    let kept: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(key, value)| !drop.contains(&key.as_str()) && !value.is_empty())
        .collect();
    serde_html_form::to_string(&kept).unwrap_or_default()
}

/// Adds the query strings pagination and sort links are built from.
pub fn insert_list_query(context: &mut Context, request: &HttpRequest) {
    context.insert("page_query", &query_without(request, &["page"]));
    context.insert("sort_query", &query_without(request, &["page", "sort", "dir"]));
}

/// Turns a failed mutation into a flash message and a redirect.
///
/// `action` completes the sentence "Failed to ...".
pub fn flash_error_redirect(err: ServiceError, back: &str, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("You are not allowed to do that.").send();
            redirect("/")
        }
        ServiceError::NotFound => {
            FlashMessage::error("Record not found.").send();
            redirect(back)
        }
        ServiceError::Form(message)
        | ServiceError::TypeConstraint(message)
        | ServiceError::Conflict(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        err => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(format!("Failed to {action}.")).send();
            redirect(back)
        }
    }
}

/// Status code a JSON endpoint answers with for a failed service call.
pub fn json_error(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message)
        | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": message }))
        }
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
