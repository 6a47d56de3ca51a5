use crate::domain::content::{BlogPost, SeoEntry};
use crate::dto::ListView;
use crate::pagination::Paginated;

#[derive(Debug)]
pub struct SeoPageData {
    pub entries: Paginated<SeoEntry>,
    pub view: ListView,
}

#[derive(Debug)]
pub struct BlogPageData {
    pub posts: Paginated<BlogPost>,
    pub view: ListView,
}
