use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::files::AssetFilters;
use crate::forms::files::AddAssetForm;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::files as files_service;

#[get("/files")]
pub async fn files(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
    filters: web::Query<AssetFilters>,
) -> impl Responder {
    match files_service::list_files(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "files");
            insert_list_query(&mut context, &request);
            context.insert("assets", &data.assets);
            context.insert("view", &data.view);
            context.insert("companies", &data.companies);
            context.insert("kinds", &data.kinds);

            render_template(&tera, "files/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list files: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/files/add")]
pub async fn add_file(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddAssetForm>,
) -> impl Responder {
    match files_service::add_file(repo.get_ref(), &user, form) {
        Ok(asset) => {
            FlashMessage::success(format!("{} added.", asset.name)).send();
            redirect("/files")
        }
        Err(err) => flash_error_redirect(err, "/files", "add the file"),
    }
}

#[post("/files/{asset_id}/delete")]
pub async fn delete_file(
    asset_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match files_service::delete_file(repo.get_ref(), &user, asset_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("File deleted.").send();
            redirect("/files")
        }
        Err(err) => flash_error_redirect(err, "/files", "delete the file"),
    }
}
