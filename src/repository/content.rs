//! SEO entries and blog posts.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::content::{BlogPost, NewBlogPost, SeoEntry, SeoEntryData};
use crate::domain::types::{BlogPostId, SeoEntryId};
use crate::models::content::{
    BlogPost as DbBlogPost, NewBlogPost as DbNewBlogPost, SeoEntry as DbSeoEntry,
    SeoEntryChanges as DbSeoEntryChanges,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BlogReader, BlogWriter, DieselRepository, SeoReader, SeoWriter};

impl SeoReader for DieselRepository {
    fn get_seo_entry_by_id(&self, id: SeoEntryId) -> RepositoryResult<Option<SeoEntry>> {
        use crate::schema::seo_entries;

        let mut conn = self.conn()?;
        let entry = seo_entries::table
            .find(id.get())
            .select(DbSeoEntry::as_select())
            .first(&mut conn)
            .optional()?;

        entry
            .map(SeoEntry::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_seo_entries(&self) -> RepositoryResult<Vec<SeoEntry>> {
        use crate::schema::seo_entries;

        let mut conn = self.conn()?;
        let rows = seo_entries::table
            .order(seo_entries::page_url.asc())
            .select(DbSeoEntry::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| SeoEntry::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl SeoWriter for DieselRepository {
    fn create_seo_entry(&self, entry: &SeoEntryData) -> RepositoryResult<SeoEntry> {
        use crate::schema::seo_entries;

        let mut conn = self.conn()?;
        let insertable = DbSeoEntryChanges::from_domain(entry, Utc::now().naive_utc());

        let row = diesel::insert_into(seo_entries::table)
            .values(&insertable)
            .returning(DbSeoEntry::as_returning())
            .get_result(&mut conn)?;

        SeoEntry::try_from(row).map_err(RepositoryError::from)
    }

    fn update_seo_entry(&self, id: SeoEntryId, entry: &SeoEntryData) -> RepositoryResult<SeoEntry> {
        use crate::schema::seo_entries;

        let mut conn = self.conn()?;
        let changes = DbSeoEntryChanges::from_domain(entry, Utc::now().naive_utc());

        let row = diesel::update(seo_entries::table.find(id.get()))
            .set(&changes)
            .returning(DbSeoEntry::as_returning())
            .get_result(&mut conn)?;

        SeoEntry::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_seo_entry(&self, id: SeoEntryId) -> RepositoryResult<()> {
        use crate::schema::seo_entries;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(seo_entries::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl BlogReader for DieselRepository {
    fn get_blog_post_by_id(&self, id: BlogPostId) -> RepositoryResult<Option<BlogPost>> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let post = blog_posts::table
            .find(id.get())
            .select(DbBlogPost::as_select())
            .first(&mut conn)
            .optional()?;

        post.map(BlogPost::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_blog_posts(&self) -> RepositoryResult<Vec<BlogPost>> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let rows = blog_posts::table
            .order(blog_posts::created_at.desc())
            .then_order_by(blog_posts::id.desc())
            .select(DbBlogPost::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| BlogPost::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl BlogWriter for DieselRepository {
    fn create_blog_post(&self, post: &NewBlogPost) -> RepositoryResult<BlogPost> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let insertable: DbNewBlogPost = post.into();

        let row = diesel::insert_into(blog_posts::table)
            .values(&insertable)
            .returning(DbBlogPost::as_returning())
            .get_result(&mut conn)?;

        BlogPost::try_from(row).map_err(RepositoryError::from)
    }

    fn set_blog_post_published(
        &self,
        id: BlogPostId,
        published: bool,
    ) -> RepositoryResult<BlogPost> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let row = diesel::update(blog_posts::table.find(id.get()))
            .set((
                blog_posts::published.eq(published),
                blog_posts::updated_at.eq(Utc::now().naive_utc()),
            ))
            .returning(DbBlogPost::as_returning())
            .get_result(&mut conn)?;

        BlogPost::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_blog_post(&self, id: BlogPostId) -> RepositoryResult<()> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(blog_posts::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
