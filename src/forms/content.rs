use serde::Deserialize;
use validator::Validate;

use crate::domain::content::{NewBlogPost, SeoEntryData, parse_keywords};
use crate::domain::types::{AssetUrl, SanitizedText, Title};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct SeoForm {
    #[validate(url)]
    pub page_url: String,
    #[validate(length(min = 1, max = 70))]
    pub meta_title: String,
    #[serde(default)]
    #[validate(length(max = 160))]
    pub meta_description: String,
    /// Comma separated.
    #[serde(default)]
    pub keywords: String,
}

impl TryFrom<SeoForm> for SeoEntryData {
    type Error = FormError;

    fn try_from(form: SeoForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            page_url: AssetUrl::new(form.page_url).map_err(|_| FormError::InvalidUrl)?,
            meta_title: Title::new(form.meta_title).map_err(|_| FormError::InvalidName)?,
            meta_description: ammonia::clean(form.meta_description.trim()),
            keywords: parse_keywords(&form.keywords),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct BlogPostForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub published: Option<String>,
}

impl BlogPostForm {
    pub fn into_domain(self, author: String) -> Result<NewBlogPost, FormError> {
        self.validate()?;
        let title = Title::new(self.title).map_err(|_| FormError::InvalidName)?;
        let content = SanitizedText::new(self.content).map_err(|_| FormError::InvalidText)?;
        NewBlogPost::new(title, author, content, self.published.is_some())
            .map_err(|_| FormError::InvalidName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seo_form_splits_keywords_and_cleans_description() {
        let data = SeoEntryData::try_from(SeoForm {
            page_url: "https://eliteassociate.in/mba".into(),
            meta_title: "Online MBA".into(),
            meta_description: "Best <script>x</script>MBA".into(),
            keywords: "mba, online mba, MBA".into(),
        })
        .expect("valid form");
        assert_eq!(data.keywords, vec!["mba", "online mba"]);
        assert_eq!(data.meta_description, "Best MBA");
    }

    #[test]
    fn overlong_meta_title_is_rejected() {
        let result = SeoEntryData::try_from(SeoForm {
            page_url: "https://eliteassociate.in/".into(),
            meta_title: "x".repeat(71),
            meta_description: String::new(),
            keywords: String::new(),
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn blog_post_gets_slug_and_flag() {
        let post = BlogPostForm {
            title: "Admissions Open 2026".into(),
            content: "<p>Apply now</p>".into(),
            published: Some("on".into()),
        }
        .into_domain("editor@example.com".into())
        .expect("valid post");
        assert_eq!(post.slug.as_str(), "admissions-open-2026");
        assert!(post.published);
    }
}
