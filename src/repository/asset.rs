use diesel::prelude::*;

use crate::domain::asset::{Asset, NewAsset};
use crate::domain::types::AssetId;
use crate::models::asset::{Asset as DbAsset, NewAsset as DbNewAsset};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AssetReader, AssetWriter, DieselRepository};

impl AssetReader for DieselRepository {
    fn get_asset_by_id(&self, id: AssetId) -> RepositoryResult<Option<Asset>> {
        use crate::schema::assets;

        let mut conn = self.conn()?;
        let asset = assets::table
            .find(id.get())
            .select(DbAsset::as_select())
            .first(&mut conn)
            .optional()?;

        asset
            .map(Asset::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_assets(&self) -> RepositoryResult<Vec<Asset>> {
        use crate::schema::assets;

        let mut conn = self.conn()?;
        let rows = assets::table
            .order(assets::created_at.desc())
            .then_order_by(assets::id.desc())
            .select(DbAsset::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| Asset::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl AssetWriter for DieselRepository {
    fn create_asset(&self, new_asset: &NewAsset) -> RepositoryResult<Asset> {
        use crate::schema::assets;

        let mut conn = self.conn()?;
        let insertable: DbNewAsset = new_asset.into();

        let row = diesel::insert_into(assets::table)
            .values(&insertable)
            .returning(DbAsset::as_returning())
            .get_result(&mut conn)?;

        Asset::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_asset(&self, id: AssetId) -> RepositoryResult<()> {
        use crate::schema::assets;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(assets::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
