use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::utils::{resolve_image_url, slug_or_derive};
use crate::common::{BlogPostId, Validate, ValidationErrors};
use crate::domains::blog::models::{BlogPost, CreateBlogPost, UpdateBlogPost};

const WORDS_PER_MINUTE: usize = 200;

/// Card for the blog index (no body)
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostSummary {
    pub id: BlogPostId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image_url: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub reading_minutes: usize,
}

/// Full article
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostData {
    #[serde(flatten)]
    pub summary: BlogPostSummary,
    pub content: String,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

pub fn reading_minutes(content: &str) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

impl BlogPostSummary {
    pub fn from_model(post: &BlogPost, fallback_image: &str) -> Self {
        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            cover_image_url: resolve_image_url(post.cover_image_url.as_deref(), fallback_image),
            author: post.author.clone(),
            published_at: post.published_at,
            reading_minutes: reading_minutes(&post.content),
        }
    }
}

impl BlogPostData {
    pub fn from_model(post: BlogPost, now: DateTime<Utc>, fallback_image: &str) -> Self {
        Self {
            summary: BlogPostSummary::from_model(&post, fallback_image),
            is_published: post.is_live_at(now),
            updated_at: post.updated_at,
            content: post.content,
        }
    }
}

impl CreateBlogPost {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.title)
    }
}

impl Validate for CreateBlogPost {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        if !self.title.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.require_text("content", &self.content);
        errors.check_url("cover_image_url", self.cover_image_url.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateBlogPost {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("title", self.title.as_deref());
        errors.reject_blank("content", self.content.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_url("cover_image_url", self.cover_image_url.as_deref());
        if self.unpublish && self.published_at.is_some() {
            errors.add("published_at", "cannot be set while unpublishing");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_rounds_up_with_a_floor_of_one() {
        assert_eq!(reading_minutes(""), 1);
        assert_eq!(reading_minutes(&"palabra ".repeat(200)), 1);
        assert_eq!(reading_minutes(&"palabra ".repeat(201)), 2);
    }

    #[test]
    fn create_requires_title_and_content() {
        let errors = CreateBlogPost::default().validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["content", "title"]);
    }

    #[test]
    fn unpublish_conflicts_with_new_date() {
        let input = UpdateBlogPost {
            unpublish: true,
            published_at: Some(Utc::now()),
            ..Default::default()
        };
        assert!(input.validate().unwrap_err().contains("published_at"));
    }

    #[test]
    fn future_posts_are_not_live() {
        let now = Utc::now();
        let post = BlogPost {
            id: BlogPostId::new(),
            slug: "guia-de-cancun".to_string(),
            title: "Guía de Cancún".to_string(),
            excerpt: None,
            content: "Texto".to_string(),
            cover_image_url: Some("".to_string()),
            author: None,
            published_at: Some(now + chrono::Duration::days(1)),
            created_at: now,
            updated_at: now,
        };
        let data = BlogPostData::from_model(post, now, "/f.jpg");
        assert!(!data.is_published);
        assert_eq!(data.summary.cover_image_url, "/f.jpg");
    }
}
