//! Marketing content: SEO metadata per page and blog posts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AssetUrl, BlogPostId, SanitizedText, SeoEntryId, Slug, Title};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeoEntry {
    pub id: SeoEntryId,
    pub page_url: AssetUrl,
    pub meta_title: Title,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating or replacing the SEO metadata of a page.
#[derive(Clone, Debug)]
pub struct SeoEntryData {
    pub page_url: AssetUrl,
    pub meta_title: Title,
    pub meta_description: String,
    pub keywords: Vec<String>,
}

/// Splits a comma separated keyword list, trimming and dropping duplicates
/// while keeping first-seen order.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: Title,
    pub slug: Slug,
    pub author: String,
    pub content: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewBlogPost {
    pub title: Title,
    pub slug: Slug,
    pub author: String,
    pub content: SanitizedText,
    pub published: bool,
}

impl NewBlogPost {
    /// Derives the slug from the title.
    pub fn new(
        title: Title,
        author: String,
        content: SanitizedText,
        published: bool,
    ) -> Result<Self, crate::domain::types::TypeConstraintError> {
        let slug = Slug::from_title(title.as_str())?;
        Ok(Self {
            title,
            slug,
            author,
            content,
            published,
        })
    }
}
