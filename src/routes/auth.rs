use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::forms::auth::LoginForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{alert_level_to_str, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

#[get("/auth/signin")]
pub async fn signin(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", "signin");

    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn login(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let user = match auth_service::login(repo.get_ref(), form) {
        Ok(user) => user,
        Err(ServiceError::Unauthorized) | Err(ServiceError::Form(_)) => {
            FlashMessage::error("Invalid email or password.").send();
            return redirect("/auth/signin");
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("Sign-in is unavailable, try again later.").send();
            return redirect("/auth/signin");
        }
    };

    let token = match user.to_jwt(&server_config.secret) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Failed to issue a session token: {err}");
            FlashMessage::error("Sign-in is unavailable, try again later.").send();
            return redirect("/auth/signin");
        }
    };

    if let Err(err) = Identity::login(&request.extensions(), token) {
        log::error!("Failed to attach identity: {err}");
        FlashMessage::error("Sign-in is unavailable, try again later.").send();
        return redirect("/auth/signin");
    }

    log::info!("{} signed in", user.email);
    redirect("/")
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/auth/signin")
}
