use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::team::AddMemberForm;
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::{ServiceError, team as team_service};

#[get("/team")]
pub async fn team(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match team_service::list_team(repo.get_ref(), &user, query.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "team");
            insert_list_query(&mut context, &request);
            context.insert("members", &data.members);
            context.insert("view", &data.view);
            context.insert("can_edit", &data.can_edit);

            render_template(&tera, "team/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You are not allowed to do that.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list team members: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/team/{member_id}")]
pub async fn show_member(
    member_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match team_service::show_member(repo.get_ref(), &user, member_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "team");
            context.insert("member", &data.member);
            context.insert("assigned_leads", &data.assigned_leads);

            render_template(&tera, "team/show.html", &context)
        }
        Err(err) => flash_error_redirect(err, "/team", "load the team member"),
    }
}

#[post("/team/add")]
pub async fn add_member(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddMemberForm>,
) -> impl Responder {
    match team_service::add_member(repo.get_ref(), &user, form) {
        Ok(member) => {
            FlashMessage::success(format!("{} added to the team.", member.name)).send();
            redirect("/team")
        }
        Err(err) => flash_error_redirect(err, "/team", "add the team member"),
    }
}

#[post("/team/{member_id}/delete")]
pub async fn delete_member(
    member_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match team_service::delete_member(repo.get_ref(), &user, member_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Team member removed.").send();
            redirect("/team")
        }
        Err(err) => flash_error_redirect(err, "/team", "remove the team member"),
    }
}
