use serde::Deserialize;
use validator::Validate;

use crate::domain::mail::NewMailRecord;
use crate::domain::types::{EmailAddress, NonEmptyString};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct RecordMailForm {
    #[validate(email)]
    pub recipient: String,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
}

impl RecordMailForm {
    pub fn into_domain(self, sent_by: EmailAddress) -> Result<NewMailRecord, FormError> {
        self.validate()?;
        Ok(NewMailRecord {
            recipient: EmailAddress::new(self.recipient).map_err(|_| FormError::InvalidEmail)?,
            subject: NonEmptyString::new(ammonia::clean(&self.subject))
                .map_err(|_| FormError::InvalidText)?,
            sent_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_is_normalized() {
        let record = RecordMailForm {
            recipient: "Lead@Example.com".into(),
            subject: "Brochure".into(),
        }
        .into_domain(EmailAddress::new("sales@example.com").expect("valid"))
        .expect("valid form");
        assert_eq!(record.recipient.as_str(), "lead@example.com");
    }
}
