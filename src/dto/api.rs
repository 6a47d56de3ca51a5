//! JSON bodies returned by the `/api/v1` endpoints.

use serde::Serialize;

use crate::domain::team_member::TeamMember;

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub created: usize,
}

/// Team member as offered in assignment pickers.
#[derive(Debug, Serialize)]
pub struct AssignableMember {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&TeamMember> for AssignableMember {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id.get(),
            name: member.name.as_str().to_string(),
            email: member.email.as_str().to_string(),
            role: member.role.as_str().to_string(),
        }
    }
}

/// Settings the calling widget needs to register with the signalling server.
#[derive(Debug, Serialize)]
pub struct IvrConfigData {
    pub ws_url: String,
    pub uri: String,
    pub password: String,
    pub display_name: Option<String>,
}
