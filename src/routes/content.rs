//! SEO metadata and blog management pages.

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::content::{BlogPostForm, SeoForm};
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::{ServiceError, content as content_service};

#[get("/seo")]
pub async fn seo(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match content_service::list_seo(repo.get_ref(), &user, query.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "seo");
            insert_list_query(&mut context, &request);
            context.insert("entries", &data.entries);
            context.insert("view", &data.view);

            render_template(&tera, "content/seo.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You are not allowed to do that.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list SEO entries: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/seo/add")]
pub async fn add_seo(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SeoForm>,
) -> impl Responder {
    match content_service::create_seo(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("SEO entry added.").send();
            redirect("/seo")
        }
        Err(err) => flash_error_redirect(err, "/seo", "add the SEO entry"),
    }
}

#[post("/seo/{entry_id}/edit")]
pub async fn edit_seo(
    entry_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SeoForm>,
) -> impl Responder {
    match content_service::update_seo(repo.get_ref(), &user, entry_id.into_inner(), form) {
        Ok(_) => {
            FlashMessage::success("SEO entry updated.").send();
            redirect("/seo")
        }
        Err(err) => flash_error_redirect(err, "/seo", "update the SEO entry"),
    }
}

#[post("/seo/{entry_id}/delete")]
pub async fn delete_seo(
    entry_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match content_service::delete_seo(repo.get_ref(), &user, entry_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("SEO entry deleted.").send();
            redirect("/seo")
        }
        Err(err) => flash_error_redirect(err, "/seo", "delete the SEO entry"),
    }
}

#[get("/blog")]
pub async fn blog(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match content_service::list_posts(repo.get_ref(), &user, query.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "blog");
            insert_list_query(&mut context, &request);
            context.insert("posts", &data.posts);
            context.insert("view", &data.view);

            render_template(&tera, "content/blog.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You are not allowed to do that.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list blog posts: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/blog/add")]
pub async fn add_post(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BlogPostForm>,
) -> impl Responder {
    match content_service::create_post(repo.get_ref(), &user, form) {
        Ok(post) => {
            FlashMessage::success(format!("Post \"{}\" saved.", post.title)).send();
            redirect("/blog")
        }
        Err(err) => flash_error_redirect(err, "/blog", "save the post"),
    }
}

#[post("/blog/{post_id}/publish")]
pub async fn toggle_publish(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match content_service::toggle_publish(repo.get_ref(), &user, post_id.into_inner()) {
        Ok(post) if post.published => {
            FlashMessage::success("Post published.").send();
            redirect("/blog")
        }
        Ok(_) => {
            FlashMessage::success("Post moved back to drafts.").send();
            redirect("/blog")
        }
        Err(err) => flash_error_redirect(err, "/blog", "change the post"),
    }
}

#[post("/blog/{post_id}/delete")]
pub async fn delete_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match content_service::delete_post(repo.get_ref(), &user, post_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Post deleted.").send();
            redirect("/blog")
        }
        Err(err) => flash_error_redirect(err, "/blog", "delete the post"),
    }
}
