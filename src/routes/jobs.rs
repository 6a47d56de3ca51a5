use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::job_listing::JobRecord;
use crate::dto::jobs::JobFilters;
use crate::forms::FormError;
use crate::forms::jobs::UploadJobsForm;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::jobs as jobs_service;

#[get("/jobs")]
pub async fn jobs(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
    filters: web::Query<JobFilters>,
) -> impl Responder {
    match jobs_service::list_jobs(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "jobs");
            insert_list_query(&mut context, &request);
            context.insert("jobs", &data.jobs);
            context.insert("view", &data.view);
            context.insert("categories", &data.categories);
            context.insert("locations", &data.locations);
            context.insert("job_types", &data.job_types);
            context.insert("can_edit", &data.can_edit);

            render_template(&tera, "jobs/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list job listings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn import(
    repo: &DieselRepository,
    user: &AuthenticatedUser,
    parsed: Result<Vec<JobRecord>, FormError>,
) -> HttpResponse {
    let records = match parsed {
        Ok(records) => records,
        Err(err) => {
            FlashMessage::error(format!("Could not read the upload: {err}")).send();
            return redirect("/jobs");
        }
    };

    match jobs_service::import_jobs(repo, user, records) {
        Ok(count) => {
            FlashMessage::success(format!("{count} job listings imported.")).send();
            redirect("/jobs")
        }
        Err(err) => flash_error_redirect(err, "/jobs", "import the job listings"),
    }
}

#[post("/jobs/upload/csv")]
pub async fn upload_csv(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadJobsForm>,
) -> impl Responder {
    import(repo.get_ref(), &user, form.parse_csv())
}

#[post("/jobs/upload/json")]
pub async fn upload_json(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadJobsForm>,
) -> impl Responder {
    import(repo.get_ref(), &user, form.parse_json())
}

#[post("/jobs/{job_id}/delete")]
pub async fn delete_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match jobs_service::delete_job(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Job listing deleted.").send();
            redirect("/jobs")
        }
        Err(err) => flash_error_redirect(err, "/jobs", "delete the job listing"),
    }
}
