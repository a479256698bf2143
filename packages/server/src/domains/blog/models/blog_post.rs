use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{BlogPostId, PageParams};
use crate::server::Visibility;

/// Blog post model. A post is live once `published_at` is set and in the past.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBlogPost {
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPost {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Clears `published_at`, taking the post back to draft
    #[serde(default)]
    pub unpublish: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPostFilter {
    pub q: Option<String>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl BlogPostFilter {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl BlogPost {
    /// Newest first; drafts sort after published posts for admins
    pub async fn find_with_filters(
        filter: &BlogPostFilter,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let page = filter.page();
        let posts = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM blog_posts
            WHERE ($1 OR (published_at IS NOT NULL AND published_at <= NOW()))
              AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
            ORDER BY published_at DESC NULLS LAST, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(visibility.include_unpublished())
        .bind(filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    pub async fn find_by_id(id: BlogPostId, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(post)
    }

    pub async fn find_by_slug(
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM blog_posts
            WHERE slug = $1
              AND ($2 OR (published_at IS NOT NULL AND published_at <= NOW()))
            "#,
        )
        .bind(slug)
        .bind(visibility.include_unpublished())
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    pub async fn create(slug: &str, input: &CreateBlogPost, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO blog_posts (
                id, slug, title, excerpt, content, cover_image_url, author, published_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(BlogPostId::new())
        .bind(slug)
        .bind(input.title.trim())
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.cover_image_url)
        .bind(&input.author)
        .bind(input.published_at)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    pub async fn update(id: BlogPostId, input: &UpdateBlogPost, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            UPDATE blog_posts SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                cover_image_url = COALESCE($6, cover_image_url),
                author = COALESCE($7, author),
                published_at = CASE WHEN $8 THEN NULL ELSE COALESCE($9, published_at) END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.title.as_deref().map(str::trim))
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.cover_image_url)
        .bind(&input.author)
        .bind(input.unpublish)
        .bind(input.published_at)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    pub async fn delete(id: BlogPostId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
