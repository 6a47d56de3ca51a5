//! Outbound mail tracking.

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, MailRecordId, NonEmptyString, TypeConstraintError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailStatus {
    Sent,
    Opened,
    Bounced,
}

impl MailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailStatus::Sent => "sent",
            MailStatus::Opened => "opened",
            MailStatus::Bounced => "bounced",
        }
    }
}

impl Display for MailStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MailStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "sent" => Ok(MailStatus::Sent),
            "opened" => Ok(MailStatus::Opened),
            "bounced" => Ok(MailStatus::Bounced),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown mail status {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MailRecord {
    pub id: MailRecordId,
    pub recipient: EmailAddress,
    pub subject: String,
    pub status: MailStatus,
    pub sent_by: String,
    pub sent_at: NaiveDateTime,
    pub opened_at: Option<NaiveDateTime>,
}

impl MailRecord {
    /// Status change allowed from the current status, if any.
    ///
    /// A bounced mail can never be opened, and an opened mail stays opened.
    pub fn transition(&self, to: MailStatus) -> Result<MailStatus, TypeConstraintError> {
        match (self.status, to) {
            (MailStatus::Sent, MailStatus::Opened | MailStatus::Bounced) => Ok(to),
            (from, to) if from == to => Ok(to),
            (from, to) => Err(TypeConstraintError::InvalidValue(format!(
                "mail cannot go from {from} to {to}"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewMailRecord {
    pub recipient: EmailAddress,
    pub subject: NonEmptyString,
    pub sent_by: EmailAddress,
}
