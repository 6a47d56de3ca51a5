use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::asset::{Asset as DomainAsset, NewAsset as DomainNewAsset};
use crate::domain::role::Role;
use crate::domain::types::{AssetId, AssetName, AssetUrl, ProductCompany, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Asset {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub product_company: String,
    pub created_by: String,
    pub creator_role: String,
    pub is_social_media: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::assets)]
pub struct NewAsset<'a> {
    pub name: &'a str,
    pub image_url: &'a str,
    pub product_company: &'a str,
    pub created_by: &'a str,
    pub creator_role: &'a str,
    pub is_social_media: bool,
}

impl TryFrom<Asset> for DomainAsset {
    type Error = TypeConstraintError;

    fn try_from(asset: Asset) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AssetId::new(asset.id)?,
            name: AssetName::new(asset.name)?,
            image_url: AssetUrl::new(asset.image_url)?,
            product_company: ProductCompany::new(asset.product_company)?,
            created_by: asset.created_by,
            creator_role: Role::parse(&asset.creator_role),
            is_social_media: asset.is_social_media,
            created_at: asset.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAsset> for NewAsset<'a> {
    fn from(asset: &'a DomainNewAsset) -> Self {
        Self {
            name: asset.name.as_str(),
            image_url: asset.image_url.as_str(),
            product_company: asset.product_company.as_str(),
            created_by: asset.created_by.as_str(),
            creator_role: asset.creator_role.as_str(),
            is_social_media: asset.is_social_media,
        }
    }
}
