//! Session identity carried in the identity cookie as a signed JWT.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::domain::team_member::TeamMember;
use crate::models::config::ServerConfig;

/// How long a sign-in stays valid.
pub const SESSION_TTL_DAYS: i64 = 1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Team member id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_member(member: &TeamMember) -> Self {
        let mut user = Self {
            sub: member.id.to_string(),
            email: member.email.as_str().to_string(),
            name: member.name.as_str().to_string(),
            role: member.role.as_str().to_string(),
            exp: 0,
        };
        user.set_expiration(SESSION_TTL_DAYS);
        user
    }

    pub fn set_expiration(&mut self, days: i64) {
        let expiration = Utc::now() + Duration::days(days);
        self.exp = usize::try_from(expiration.timestamp()).unwrap_or_default();
    }

    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.role() == *role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        let current = self.role();
        roles.iter().any(|role| *role == current)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req.get_identity().and_then(|identity| identity.id()) {
            Ok(token) => token,
            Err(_) => return ready(Err(ErrorUnauthorized("Not signed in"))),
        };

        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server configuration is not registered as app data");
            return ready(Err(ErrorUnauthorized("Not signed in")));
        };

        ready(
            AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|e| {
                log::warn!("Rejected session token: {e}");
                ErrorUnauthorized("Invalid session")
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AuthenticatedUser {
        let mut user = AuthenticatedUser {
            sub: "1".into(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            role: role.into(),
            exp: 0,
        };
        user.set_expiration(1);
        user
    }

    #[test]
    fn token_round_trips_with_the_same_secret() {
        let user = user("admin");
        let token = user.to_jwt("secret").expect("encode");
        assert_eq!(AuthenticatedUser::from_jwt(&token, "secret").expect("decode"), user);
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let mut user = user("sales");
        user.set_expiration(-2);
        let token = user.to_jwt("secret").expect("encode");
        assert!(AuthenticatedUser::from_jwt(&token, "secret").is_err());
    }

    #[test]
    fn role_checks_ignore_case() {
        let user = user("Counsellor");
        assert!(!user.is_admin());
        assert!(user.has_role(&Role::Counsellor));
        assert!(user.has_any_role(&[Role::Sales, Role::Counsellor]));
        assert!(!user.has_any_role(&[Role::Admin]));
    }
}
