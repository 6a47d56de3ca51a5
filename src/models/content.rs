use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::content::{
    BlogPost as DomainBlogPost, NewBlogPost as DomainNewBlogPost, SeoEntry as DomainSeoEntry,
    SeoEntryData, parse_keywords,
};
use crate::domain::types::{AssetUrl, BlogPostId, SeoEntryId, Slug, Title, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::seo_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SeoEntry {
    pub id: i32,
    pub page_url: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Comma separated.
    pub keywords: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::seo_entries)]
pub struct SeoEntryChanges<'a> {
    pub page_url: &'a str,
    pub meta_title: &'a str,
    pub meta_description: &'a str,
    pub keywords: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub content: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct NewBlogPost<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub author: &'a str,
    pub content: &'a str,
    pub published: bool,
}

impl TryFrom<SeoEntry> for DomainSeoEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: SeoEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SeoEntryId::new(entry.id)?,
            page_url: AssetUrl::new(entry.page_url)?,
            meta_title: Title::new(entry.meta_title)?,
            meta_description: entry.meta_description,
            keywords: parse_keywords(&entry.keywords),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }
}

impl<'a> SeoEntryChanges<'a> {
    pub fn from_domain(entry: &'a SeoEntryData, now: NaiveDateTime) -> Self {
        Self {
            page_url: entry.page_url.as_str(),
            meta_title: entry.meta_title.as_str(),
            meta_description: entry.meta_description.as_str(),
            keywords: entry.keywords.join(", "),
            updated_at: now,
        }
    }
}

impl TryFrom<BlogPost> for DomainBlogPost {
    type Error = TypeConstraintError;

    fn try_from(post: BlogPost) -> Result<Self, Self::Error> {
        let slug = Slug::from_title(&post.slug)?;
        Ok(Self {
            id: BlogPostId::new(post.id)?,
            title: Title::new(post.title)?,
            slug,
            author: post.author,
            content: post.content,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBlogPost> for NewBlogPost<'a> {
    fn from(post: &'a DomainNewBlogPost) -> Self {
        Self {
            title: post.title.as_str(),
            slug: post.slug.as_str(),
            author: post.author.as_str(),
            content: post.content.as_str(),
            published: post.published,
        }
    }
}
