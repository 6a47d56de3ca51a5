use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::leads::LeadFilters;
use crate::forms::leads::{AddRemarkForm, AssignForm, BulkAssignForm, LeadForm};
use crate::listing::ListQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, flash_error_redirect, insert_list_query, redirect, render_template,
};
use crate::services::{ServiceError, leads as leads_service};

#[get("/")]
pub async fn index(_user: AuthenticatedUser) -> impl Responder {
    redirect("/leads")
}

#[get("/leads")]
pub async fn leads(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    query: web::Query<ListQuery>,
    filters: web::Query<LeadFilters>,
) -> impl Responder {
    match leads_service::list_leads(
        repo.get_ref(),
        &user,
        query.into_inner(),
        filters.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "leads");
            insert_list_query(&mut context, &request);
            context.insert("leads", &data.leads);
            context.insert("view", &data.view);
            context.insert("statuses", &data.statuses);
            context.insert("call_statuses", &data.call_statuses);
            context.insert("companies", &data.companies);
            context.insert("assignable", &data.assignable);
            context.insert("can_assign", &data.can_assign);
            context.insert("can_delete", &data.can_delete);

            render_template(&tera, "leads/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/leads/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::show_lead(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "leads");
            context.insert("lead", &data.lead);
            context.insert("remarks", &data.remarks);
            context.insert("assignable", &data.assignable);
            context.insert("can_assign", &data.can_assign);
            context.insert("can_delete", &data.can_delete);

            render_template(&tera, "leads/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => flash_error_redirect(err, "/leads", "load the lead"),
    }
}

#[post("/leads/add")]
pub async fn add_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LeadForm>,
) -> impl Responder {
    match leads_service::create_lead(repo.get_ref(), &user, form) {
        Ok(lead) => {
            FlashMessage::success(format!("Lead {} added.", lead.full_name)).send();
            redirect("/leads")
        }
        Err(err) => flash_error_redirect(err, "/leads", "add the lead"),
    }
}

#[post("/leads/{lead_id}/edit")]
pub async fn edit_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LeadForm>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    let back = format!("/leads/{lead_id}");
    match leads_service::update_lead(repo.get_ref(), &user, lead_id, form) {
        Ok(_) => {
            FlashMessage::success("Lead updated.").send();
            redirect(&back)
        }
        Err(err) => flash_error_redirect(err, &back, "update the lead"),
    }
}

#[post("/leads/{lead_id}/remarks")]
pub async fn add_remark(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddRemarkForm>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    let back = format!("/leads/{lead_id}");
    match leads_service::add_remark(repo.get_ref(), &user, lead_id, form) {
        Ok(_) => {
            FlashMessage::success("Remark added.").send();
            redirect(&back)
        }
        Err(err) => flash_error_redirect(err, &back, "add the remark"),
    }
}

#[post("/leads/{lead_id}/assign")]
pub async fn assign_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AssignForm>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    let back = format!("/leads/{lead_id}");
    match leads_service::assign_lead(repo.get_ref(), &user, lead_id, form) {
        Ok(()) => {
            FlashMessage::success("Lead assigned.").send();
            redirect(&back)
        }
        Err(err) => flash_error_redirect(err, &back, "assign the lead"),
    }
}

/// Bulk assignment posts `lead_ids` once per selected row, which
/// `web::Form` cannot collect.
#[post("/leads/assign")]
pub async fn assign_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match BulkAssignForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/leads");
        }
    };

    match leads_service::assign_leads(repo.get_ref(), &user, form) {
        Ok(count) => {
            FlashMessage::success(format!("{count} leads assigned.")).send();
            redirect("/leads")
        }
        Err(err) => flash_error_redirect(err, "/leads", "assign the leads"),
    }
}

#[post("/leads/{lead_id}/delete")]
pub async fn delete_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match leads_service::delete_lead(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Lead deleted.").send();
            redirect("/leads")
        }
        Err(err) => flash_error_redirect(err, "/leads", "delete the lead"),
    }
}
