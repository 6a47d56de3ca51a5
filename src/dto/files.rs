use serde::{Deserialize, Serialize};

use crate::domain::asset::{Asset, FileKind};
use crate::dto::ListView;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct AssetFilters {
    pub product_company: Option<String>,
    /// One of the [`FileKind`] labels.
    pub kind: Option<String>,
    /// `true` or `false`; anything else shows all.
    pub social: Option<String>,
}

impl AssetFilters {
    pub fn into_fields(self) -> [(&'static str, Option<String>); 3] {
        [
            ("product_company", self.product_company),
            ("kind", self.kind),
            (
                "is_social_media",
                self.social.filter(|v| v == "true" || v == "false"),
            ),
        ]
    }
}

/// Files table row with the display kind and the download filename.
#[derive(Clone, Debug, Serialize)]
pub struct AssetRow {
    #[serde(flatten)]
    pub asset: Asset,
    pub kind: FileKind,
    pub download_name: String,
    pub can_delete: bool,
}

#[derive(Debug)]
pub struct FilesPageData {
    pub assets: Paginated<AssetRow>,
    pub view: ListView,
    pub companies: Vec<String>,
    pub kinds: Vec<&'static str>,
}

/// Where the browser should fetch the file from and what to call it.
#[derive(Debug, Serialize)]
pub struct DownloadData {
    pub url: String,
    pub file_name: String,
}
