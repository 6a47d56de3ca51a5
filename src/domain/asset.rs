//! Uploaded images/files and their display classification.

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::role::Role;
use crate::domain::types::{AssetId, AssetName, AssetUrl, EmailAddress, ProductCompany};

/// Coarse file category used for icons and grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    #[serde(rename = "PDF")]
    Pdf,
    Word,
    PowerPoint,
    Excel,
    Other,
}

const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "avif"];
const WORD_EXTENSIONS: [&str; 2] = ["docx", "doc"];
const POWERPOINT_EXTENSIONS: [&str; 2] = ["pptx", "ppt"];
const EXCEL_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Lower-cased path part of a URL or filename: no query string or fragment.
fn path_part(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].to_lowercase()
}

/// Extension of the last path segment, if any.
fn extension(url: &str) -> Option<String> {
    let path = path_part(url);
    let segment = path.rsplit('/').next().unwrap_or(&path);
    let (_, ext) = segment.rsplit_once('.')?;
    Some(ext.to_string()).filter(|e| !e.is_empty())
}

impl FileKind {
    /// Classifies a URL or filename by extension substring match.
    ///
    /// This only picks an icon; it says nothing about the actual content.
    pub fn classify(url: &str) -> Self {
        let path = path_part(url);
        let has = |exts: &[&str]| exts.iter().any(|ext| path.contains(&format!(".{ext}")));

        if has(&IMAGE_EXTENSIONS) {
            FileKind::Image
        } else if has(&["pdf"]) {
            FileKind::Pdf
        } else if has(&WORD_EXTENSIONS) {
            FileKind::Word
        } else if has(&POWERPOINT_EXTENSIONS) {
            FileKind::PowerPoint
        } else if has(&EXCEL_EXTENSIONS) {
            FileKind::Excel
        } else {
            FileKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "Image",
            FileKind::Pdf => "PDF",
            FileKind::Word => "Word",
            FileKind::PowerPoint => "PowerPoint",
            FileKind::Excel => "Excel",
            FileKind::Other => "Other",
        }
    }

    /// Parses the label produced by [`FileKind::as_str`], ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let kind = match value.trim().to_lowercase().as_str() {
            "image" => FileKind::Image,
            "pdf" => FileKind::Pdf,
            "word" => FileKind::Word,
            "powerpoint" => FileKind::PowerPoint,
            "excel" => FileKind::Excel,
            "other" => FileKind::Other,
            _ => return None,
        };
        Some(kind)
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Download formats offered by the files page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Png,
    Jpg,
    Pdf,
}

impl DownloadFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DownloadFormat::Png => "png",
            DownloadFormat::Jpg => "jpg",
            DownloadFormat::Pdf => "pdf",
        }
    }

    fn matches(&self, ext: &str) -> bool {
        match self {
            DownloadFormat::Png => ext == "png",
            DownloadFormat::Jpg => ext == "jpg" || ext == "jpeg",
            DownloadFormat::Pdf => ext == "pdf",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// The asset would have to be transcoded; only the original is served.
    #[error("cannot convert a .{actual} file to {requested}")]
    ConversionUnsupported { actual: String, requested: String },
}

/// An uploaded image or document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: AssetId,
    pub name: AssetName,
    pub image_url: AssetUrl,
    pub product_company: ProductCompany,
    pub created_by: String,
    pub creator_role: Role,
    pub is_social_media: bool,
    pub created_at: NaiveDateTime,
}

impl Asset {
    pub fn kind(&self) -> FileKind {
        FileKind::classify(self.image_url.as_str())
    }

    /// Only admins and the uploader may remove an asset.
    pub fn can_be_deleted_by(&self, email: &str, role: &Role) -> bool {
        *role == Role::Admin || self.created_by.eq_ignore_ascii_case(email)
    }

    /// Filename offered to the browser when downloading the asset.
    ///
    /// The name keeps the real extension of the stored file. Requesting a
    /// different format is an error rather than a misleading rename.
    pub fn download_name(&self, format: Option<DownloadFormat>) -> Result<String, DownloadError> {
        let ext = extension(self.image_url.as_str());

        if let Some(format) = format {
            let actual = ext.clone().unwrap_or_default();
            if !format.matches(&actual) {
                return Err(DownloadError::ConversionUnsupported {
                    actual,
                    requested: format.extension().to_string(),
                });
            }
        }

        let stem: String = self
            .name
            .as_str()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        Ok(match ext {
            Some(ext) if !stem.to_lowercase().ends_with(&format!(".{ext}")) => {
                format!("{stem}.{ext}")
            }
            _ => stem,
        })
    }
}

#[derive(Clone, Debug)]
pub struct NewAsset {
    pub name: AssetName,
    pub image_url: AssetUrl,
    pub product_company: ProductCompany,
    pub created_by: EmailAddress,
    pub creator_role: Role,
    pub is_social_media: bool,
}
