//! SEO metadata and blog posts.

use crate::domain::content::{BlogPost, SeoEntry, SeoEntryData};
use crate::domain::types::{BlogPostId, SeoEntryId};
use crate::dto::ListView;
use crate::dto::content::{BlogPageData, SeoPageData};
use crate::forms::content::{BlogPostForm, SeoForm};
use crate::listing::{ListQuery, apply};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{BlogReader, BlogWriter, SeoReader, SeoWriter};
use crate::services::{CONTENT_ROLES, ServiceError, ServiceResult, ensure_role};

pub fn list_seo<R>(repo: &R, user: &AuthenticatedUser, query: ListQuery) -> ServiceResult<SeoPageData>
where
    R: SeoReader + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    let entries = repo.list_seo_entries()?;
    let params = query.into_unfiltered_params();
    let listing = apply(&entries, &params);
    let view = ListView::new(&params, listing.total);

    Ok(SeoPageData {
        entries: listing.into_paginated(),
        view,
    })
}

fn page_taken(err: ServiceError, data: &SeoEntryData) -> ServiceError {
    match err {
        ServiceError::Conflict(_) => {
            ServiceError::Conflict(format!("{} already has SEO metadata", data.page_url))
        }
        other => other,
    }
}

pub fn create_seo<R>(repo: &R, user: &AuthenticatedUser, form: SeoForm) -> ServiceResult<SeoEntry>
where
    R: SeoWriter + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    let data = SeoEntryData::try_from(form)?;
    repo.create_seo_entry(&data)
        .map_err(|err| page_taken(err.into(), &data))
}

pub fn update_seo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    entry_id: i32,
    form: SeoForm,
) -> ServiceResult<SeoEntry>
where
    R: SeoWriter + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    let entry_id = SeoEntryId::new(entry_id)?;
    let data = SeoEntryData::try_from(form)?;
    repo.update_seo_entry(entry_id, &data)
        .map_err(|err| page_taken(err.into(), &data))
}

pub fn delete_seo<R>(repo: &R, user: &AuthenticatedUser, entry_id: i32) -> ServiceResult<()>
where
    R: SeoWriter + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    repo.delete_seo_entry(SeoEntryId::new(entry_id)?)?;
    Ok(())
}

pub fn list_posts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<BlogPageData>
where
    R: BlogReader + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    let posts = repo.list_blog_posts()?;
    let params = query.into_unfiltered_params();
    let listing = apply(&posts, &params);
    let view = ListView::new(&params, listing.total);

    Ok(BlogPageData {
        posts: listing.into_paginated(),
        view,
    })
}

pub fn create_post<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BlogPostForm,
) -> ServiceResult<BlogPost>
where
    R: BlogWriter + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    let post = form.into_domain(user.name.clone())?;
    repo.create_blog_post(&post).map_err(|err| match ServiceError::from(err) {
        ServiceError::Conflict(_) => {
            ServiceError::Conflict(format!("A post with slug {} already exists", post.slug))
        }
        other => other,
    })
}

/// Flips the published flag.
pub fn toggle_publish<R>(
    repo: &R,
    user: &AuthenticatedUser,
    post_id: i32,
) -> ServiceResult<BlogPost>
where
    R: BlogReader + BlogWriter + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    let post_id = BlogPostId::new(post_id)?;
    let post = repo
        .get_blog_post_by_id(post_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.set_blog_post_published(post_id, !post.published)?)
}

pub fn delete_post<R>(repo: &R, user: &AuthenticatedUser, post_id: i32) -> ServiceResult<()>
where
    R: BlogWriter + ?Sized,
{
    ensure_role(user, &CONTENT_ROLES)?;

    repo.delete_blog_post(BlogPostId::new(post_id)?)?;
    Ok(())
}
