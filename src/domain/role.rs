//! Team roles recognised by the back-office.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Role attached to a team member.
///
/// Roles are stored as free-form strings and compared case-insensitively;
/// strings outside the known set are preserved verbatim in [`Role::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Marketing,
    Counsellor,
    Telecaller,
    Sales,
    Other(String),
}

impl Role {
    /// Every recognised role, in the order they are offered in forms.
    pub const KNOWN: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Marketing,
        Role::Counsellor,
        Role::Telecaller,
        Role::Sales,
    ];

    /// Parses a role string, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "marketing" => Role::Marketing,
            "counsellor" => Role::Counsellor,
            "telecaller" => Role::Telecaller,
            "sales" => Role::Sales,
            _ => Role::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Marketing => "marketing",
            Role::Counsellor => "counsellor",
            Role::Telecaller => "telecaller",
            Role::Sales => "sales",
            Role::Other(s) => s,
        }
    }

    /// Whether the role sees every record rather than only its own.
    pub fn sees_everything(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::parse(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse(" Counsellor "), Role::Counsellor);
        assert_eq!(Role::parse("telecaller"), Role::Telecaller);
    }

    #[test]
    fn unknown_roles_are_kept_verbatim() {
        let role = Role::parse("Intern");
        assert_eq!(role, Role::Other("Intern".to_string()));
        assert_eq!(role.to_string(), "Intern");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::Sales).expect("serialize");
        assert_eq!(json, "\"sales\"");
        let role: Role = serde_json::from_str("\"Marketing\"").expect("deserialize");
        assert_eq!(role, Role::Marketing);
    }
}
