use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use serde_json::{Value, json};
use tera::Tera;

use elite_crm::domain::role::Role;
use elite_crm::domain::team_member::NewTeamMember;
use elite_crm::domain::types::{EmailAddress, PersonName};
use elite_crm::ivr::SipConfig;
use elite_crm::models::config::ServerConfig;
use elite_crm::repository::{DieselRepository, TeamWriter};
use elite_crm::routes::{alert_level_to_str, configure};

mod common;

const PASSWORD: &str = "correct-horse";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        templates_dir: "templates/**/*".into(),
        secret: "test-secret-that-is-long-enough-for-cookie-keys-0123456789".into(),
        sip: SipConfig {
            ws_url: "wss://sip.example.com/ws".into(),
            uri: "sip:agent@sip.example.com".into(),
            password: "sip-pass".into(),
            display_name: None,
        },
    }
}

fn seed_member(repo: &DieselRepository, name: &str, email: &str, role: Role) {
    let hash = bcrypt::hash(PASSWORD, 4).expect("hash");
    repo.create_member(&NewTeamMember::new(
        PersonName::new(name).expect("name"),
        EmailAddress::new(email).expect("email"),
        role,
        hash,
    ))
    .expect("create member");
}

macro_rules! init_app {
    ($repo:expr) => {{
        let config = server_config();
        let key = Key::derive_from(config.secret.as_bytes());
        let tera = Tera::new(&config.templates_dir).expect("templates");
        test::init_service(
            App::new()
                .wrap(
                    FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
                        .build(),
                )
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                        .cookie_secure(false)
                        .build(),
                )
                .configure(configure)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(config)),
        )
        .await
    }};
}

macro_rules! sign_in {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/signin")
            .set_form([("email", $email), ("password", PASSWORD)])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
        resp.response()
            .cookies()
            .filter(|cookie| !cookie.value().is_empty())
            .map(Cookie::into_owned)
            .collect::<Vec<_>>()
    }};
}

fn with_cookies(mut req: test::TestRequest, cookies: &[Cookie<'static>]) -> test::TestRequest {
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    req
}

#[actix_web::test]
async fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn test_anonymous_pages_redirect_and_api_rejects() {
    let test_db = common::TestDb::new("test_anonymous_access.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/leads").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/v1/leads").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/auth/signin").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_wrong_password_returns_to_signin() {
    let test_db = common::TestDb::new("test_wrong_password.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_member(&repo, "Asha Admin", "admin@example.com", Role::Admin);
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/auth/signin")
        .set_form([("email", "admin@example.com"), ("password", "not-the-password")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");
}

#[actix_web::test]
async fn test_import_then_filter_leads_over_api() {
    let test_db = common::TestDb::new("test_import_then_filter.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_member(&repo, "Asha Admin", "admin@example.com", Role::Admin);
    seed_member(&repo, "Ravi Sales", "ravi@example.com", Role::Sales);
    let app = init_app!(repo);
    let cookies = sign_in!(app, "admin@example.com");

    let req = with_cookies(test::TestRequest::post().uri("/api/v1/leads"), &cookies)
        .set_json(json!([
            {"full_name": "Kiran Rao", "product_company": "NMIMS", "status": "Interested"},
            {"full_name": "Meera Iyer", "product_company": "Amity", "status": "interested",
             "assigned_to": "ravi@example.com"},
            {"full_name": "Dev Patel", "product_company": "Amity", "status": "rejected"}
        ]))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["created"], 3);

    let req = with_cookies(
        test::TestRequest::get().uri("/api/v1/leads?status=interested&sort=full_name&dir=asc"),
        &cookies,
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"][0]["full_name"], "Kiran Rao");
    assert_eq!(body["items"][1]["assigned_to"]["email"], "ravi@example.com");

    let req = with_cookies(test::TestRequest::get().uri("/api/v1/team/assignable"), &cookies)
        .to_request();
    let members: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(members.as_array().map(Vec::len), Some(1));
    assert_eq!(members[0]["email"], "ravi@example.com");

    let req = with_cookies(test::TestRequest::get().uri("/leads"), &cookies).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8");
    assert!(html.contains("Meera Iyer"));
}

#[actix_web::test]
async fn test_sales_sees_only_own_leads_and_gets_ivr_config() {
    let test_db = common::TestDb::new("test_sales_visibility.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_member(&repo, "Asha Admin", "admin@example.com", Role::Admin);
    seed_member(&repo, "Ravi Sales", "ravi@example.com", Role::Sales);
    let app = init_app!(repo);

    let admin = sign_in!(app, "admin@example.com");
    let req = with_cookies(test::TestRequest::post().uri("/api/v1/leads"), &admin)
        .set_json(json!([
            {"full_name": "Kiran Rao", "product_company": "NMIMS"},
            {"full_name": "Meera Iyer", "product_company": "Amity",
             "assigned_to": {"name": "Ravi Sales", "email": "ravi@example.com"}}
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let sales = sign_in!(app, "ravi@example.com");
    let req = with_cookies(test::TestRequest::get().uri("/api/v1/leads"), &sales).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["full_name"], "Meera Iyer");

    let req = with_cookies(test::TestRequest::get().uri("/api/v1/ivr/config"), &sales).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ws_url"], "wss://sip.example.com/ws");
    assert_eq!(body["display_name"], "Ravi Sales");

    let req = with_cookies(test::TestRequest::get().uri("/team"), &sales).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[actix_web::test]
async fn test_sort_links_start_new_columns_descending() {
    let test_db = common::TestDb::new("test_sort_links.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_member(&repo, "Asha Admin", "admin@example.com", Role::Admin);
    let app = init_app!(repo);
    let cookies = sign_in!(app, "admin@example.com");

    let req = with_cookies(
        test::TestRequest::get().uri("/leads?sort=created_at&dir=desc"),
        &cookies,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8");

    assert!(html.contains("sort=full_name&dir=desc"));
    assert!(!html.contains("sort=full_name&dir=asc"));
    assert!(html.contains("sort=created_at&dir=asc"));
}

#[actix_web::test]
async fn test_search_finds_lead_by_remark_text() {
    let test_db = common::TestDb::new("test_search_remarks.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_member(&repo, "Asha Admin", "admin@example.com", Role::Admin);
    let app = init_app!(repo);
    let cookies = sign_in!(app, "admin@example.com");

    let req = with_cookies(test::TestRequest::post().uri("/api/v1/leads"), &cookies)
        .set_json(json!([
            {"full_name": "Kiran Rao", "product_company": "NMIMS"},
            {"full_name": "Meera Iyer", "product_company": "Amity"}
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = with_cookies(
        test::TestRequest::get().uri("/api/v1/leads?sort=full_name&dir=asc"),
        &cookies,
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let meera = body["items"][1]["id"].as_i64().expect("lead id");

    let req = with_cookies(
        test::TestRequest::post().uri(&format!("/leads/{meera}/remarks")),
        &cookies,
    )
    .set_form([("status", "follow up"), ("message", "Wants the weekend batch")])
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = with_cookies(
        test::TestRequest::get().uri("/api/v1/leads?search=weekend"),
        &cookies,
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["full_name"], "Meera Iyer");
    assert_eq!(body["items"][0]["remarks"][0]["message"], "Wants the weekend batch");

    let req = with_cookies(
        test::TestRequest::get().uri("/api/v1/leads?search=message"),
        &cookies,
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
}
