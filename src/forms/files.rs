use serde::Deserialize;
use validator::Validate;

use crate::domain::asset::{DownloadFormat, NewAsset};
use crate::domain::role::Role;
use crate::domain::types::{AssetName, AssetUrl, EmailAddress, ProductCompany};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct AddAssetForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(length(min = 1))]
    pub product_company: String,
    /// Checkbox: present only when ticked.
    #[serde(default)]
    pub is_social_media: Option<String>,
}

pub struct AddAssetPayload {
    pub name: AssetName,
    pub image_url: AssetUrl,
    pub product_company: ProductCompany,
    pub is_social_media: bool,
}

impl TryFrom<AddAssetForm> for AddAssetPayload {
    type Error = FormError;

    fn try_from(form: AddAssetForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: AssetName::new(form.name).map_err(|_| FormError::InvalidName)?,
            image_url: AssetUrl::new(form.image_url).map_err(|_| FormError::InvalidUrl)?,
            product_company: ProductCompany::new(form.product_company)
                .map_err(|_| FormError::InvalidName)?,
            is_social_media: form.is_social_media.is_some(),
        })
    }
}

impl AddAssetPayload {
    pub fn into_domain(self, created_by: EmailAddress, creator_role: Role) -> NewAsset {
        NewAsset {
            name: self.name,
            image_url: self.image_url,
            product_company: self.product_company,
            created_by,
            creator_role,
            is_social_media: self.is_social_media,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: Option<DownloadFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_presence_sets_social_media_flag() {
        let payload = AddAssetPayload::try_from(AddAssetForm {
            name: "Banner".into(),
            image_url: "https://cdn.example.com/banner.png".into(),
            product_company: "Elite".into(),
            is_social_media: Some("on".into()),
        })
        .expect("valid form");
        assert!(payload.is_social_media);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = AddAssetPayload::try_from(AddAssetForm {
            name: "Banner".into(),
            image_url: "banner.png".into(),
            product_company: "Elite".into(),
            is_social_media: None,
        });
        assert!(result.is_err());
    }
}
