//! JSON endpoints mounted under `/api`.

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::api::ImportResult;
use crate::dto::leads::LeadFilters;
use crate::forms::files::DownloadQuery;
use crate::forms::leads::ImportLead;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::json_error;
use crate::services::{api as api_service, files as files_service};

#[get("/v1/leads")]
pub async fn api_v1_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQuery>,
    filters: web::Query<LeadFilters>,
) -> impl Responder {
    match api_service::leads_json(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(err) => json_error(err, "list leads"),
    }
}

#[post("/v1/leads")]
pub async fn api_v1_import_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Vec<ImportLead>>,
) -> impl Responder {
    match api_service::import_leads(repo.get_ref(), &user, payload) {
        Ok(created) => HttpResponse::Created().json(ImportResult { created }),
        Err(err) => json_error(err, "import leads"),
    }
}

#[get("/v1/team/assignable")]
pub async fn api_v1_assignable(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::assignable_members(repo.get_ref(), &user) {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(err) => json_error(err, "list assignable members"),
    }
}

#[get("/v1/ivr/config")]
pub async fn api_v1_ivr_config(
    user: AuthenticatedUser,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match api_service::ivr_config(&user, &server_config.sip) {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(err) => json_error(err, "load the calling configuration"),
    }
}

#[get("/v1/files/{asset_id}/download")]
pub async fn api_v1_download(
    asset_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<DownloadQuery>,
) -> impl Responder {
    match files_service::download_file(
        repo.get_ref(),
        &user,
        asset_id.into_inner(),
        query.into_inner(),
    ) {
        Ok(download) => HttpResponse::Ok().json(download),
        Err(err) => json_error(err, "prepare the download"),
    }
}
