//! Image and document library.

use crate::domain::asset::{Asset, FileKind};
use crate::domain::types::{AssetId, EmailAddress};
use crate::dto::files::{AssetFilters, AssetRow, DownloadData, FilesPageData};
use crate::dto::{ListView, distinct_options};
use crate::forms::files::{AddAssetForm, AddAssetPayload, DownloadQuery};
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AssetReader, AssetWriter};
use crate::services::{ServiceError, ServiceResult};

const KINDS: [FileKind; 6] = [
    FileKind::Image,
    FileKind::Pdf,
    FileKind::Word,
    FileKind::PowerPoint,
    FileKind::Excel,
    FileKind::Other,
];

fn row(asset: Asset, user: &AuthenticatedUser) -> AssetRow {
    let download_name = asset
        .download_name(None)
        .unwrap_or_else(|_| asset.name.as_str().to_string());
    AssetRow {
        kind: asset.kind(),
        can_delete: asset.can_be_deleted_by(&user.email, &user.role()),
        download_name,
        asset,
    }
}

pub fn list_files<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    filters: AssetFilters,
) -> ServiceResult<FilesPageData>
where
    R: AssetReader + ?Sized,
{
    let rows: Vec<AssetRow> = repo
        .list_assets()?
        .into_iter()
        .map(|asset| row(asset, user))
        .collect();

    let params = query.into_params(filters.into_fields());
    let companies = distinct_options(
        rows.iter()
            .map(|row| row.asset.product_company.as_str().to_string()),
    );

    let listing = apply(&rows, &params);
    let view = ListView::new(&params, listing.total);

    Ok(FilesPageData {
        assets: listing.into_paginated(),
        view,
        companies,
        kinds: KINDS.iter().map(FileKind::as_str).collect(),
    })
}

pub fn add_file<R>(repo: &R, user: &AuthenticatedUser, form: AddAssetForm) -> ServiceResult<Asset>
where
    R: AssetWriter + ?Sized,
{
    let payload = AddAssetPayload::try_from(form)?;
    let new_asset = payload.into_domain(EmailAddress::new(user.email.as_str())?, user.role());

    Ok(repo.create_asset(&new_asset)?)
}

/// Only admins and the uploader may delete.
pub fn delete_file<R>(repo: &R, user: &AuthenticatedUser, asset_id: i32) -> ServiceResult<()>
where
    R: AssetReader + AssetWriter + ?Sized,
{
    let asset_id = AssetId::new(asset_id)?;
    let asset = repo
        .get_asset_by_id(asset_id)?
        .ok_or(ServiceError::NotFound)?;

    if !asset.can_be_deleted_by(&user.email, &user.role()) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_asset(asset_id)?;
    Ok(())
}

/// Download location and filename; asking for another format is refused.
pub fn download_file<R>(
    repo: &R,
    _user: &AuthenticatedUser,
    asset_id: i32,
    query: DownloadQuery,
) -> ServiceResult<DownloadData>
where
    R: AssetReader + ?Sized,
{
    let asset = repo
        .get_asset_by_id(AssetId::new(asset_id)?)?
        .ok_or(ServiceError::NotFound)?;

    let file_name = asset
        .download_name(query.format)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(DownloadData {
        url: asset.image_url.into_inner(),
        file_name,
    })
}
