use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::reports::ReportFilters;
use crate::forms::reports::SubmitReportForm;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::reports as reports_service;

#[get("/reports")]
pub async fn reports(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
    filters: web::Query<ReportFilters>,
) -> impl Responder {
    match reports_service::list_reports(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "reports");
            insert_list_query(&mut context, &request);
            context.insert("reports", &data.reports);
            context.insert("view", &data.view);
            context.insert("users", &data.users);
            context.insert("sees_everyone", &data.sees_everyone);

            render_template(&tera, "reports/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list reports: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/reports/{report_id}")]
pub async fn show_report(
    report_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match reports_service::show_report(repo.get_ref(), &user, report_id.into_inner()) {
        Ok(report) => {
            let mut context = base_context(&flash_messages, &user, "reports");
            context.insert("report", &report);

            render_template(&tera, "reports/show.html", &context)
        }
        Err(err) => flash_error_redirect(err, "/reports", "load the report"),
    }
}

/// Attachments arrive as repeated `file_name`/`file_url` pairs.
#[post("/reports/submit")]
pub async fn submit_report(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match SubmitReportForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/reports");
        }
    };

    match reports_service::submit_report(repo.get_ref(), &user, form) {
        Ok(report) => {
            FlashMessage::success(format!("Report for {} submitted.", report.attendance.date))
                .send();
            redirect("/reports")
        }
        Err(err) => flash_error_redirect(err, "/reports", "submit the report"),
    }
}
