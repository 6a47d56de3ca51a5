//! Creates a team member from the command line, e.g. the first admin.
//!
//! Usage: `create_member <name> <email> <role> <password>`

use std::env;

use dotenvy::dotenv;

use elite_crm::db::establish_connection_pool;
use elite_crm::domain::role::Role;
use elite_crm::domain::team_member::NewTeamMember;
use elite_crm::domain::types::{EmailAddress, PersonName};
use elite_crm::models::config::ServerConfig;
use elite_crm::repository::{DieselRepository, TeamWriter};
use elite_crm::services::team::hash_password;

fn fail(message: impl std::fmt::Display) -> ! {
    log::error!("{message}");
    std::process::exit(1);
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let [name, email, role, password] = args.as_slice() else {
        fail("Usage: create_member <name> <email> <role> <password>");
    };

    let name = PersonName::new(name.as_str()).unwrap_or_else(|err| fail(format!("Name: {err}")));
    let email =
        EmailAddress::new(email.as_str()).unwrap_or_else(|err| fail(format!("Email: {err}")));
    let role = Role::parse(role);
    if password.chars().count() < 8 {
        fail("Password must be at least 8 characters long");
    }

    let server_config =
        ServerConfig::load().unwrap_or_else(|err| fail(format!("Error loading server config: {err}")));

    let pool = establish_connection_pool(&server_config.database_url)
        .unwrap_or_else(|err| fail(format!("Failed to establish database connection: {err}")));
    let repo = DieselRepository::new(pool);

    let password_hash = hash_password(password).unwrap_or_else(|err| fail(err));
    let new_member = NewTeamMember::new(name, email, role, password_hash);

    match repo.create_member(&new_member) {
        Ok(member) => log::info!(
            "Created {} <{}> with role {}",
            member.name,
            member.email,
            member.role
        ),
        Err(err) => fail(format!("Failed to create member: {err}")),
    }
}
