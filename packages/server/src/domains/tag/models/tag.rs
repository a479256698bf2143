use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{DestinationId, PackageId, TagId};

/// Tag - many-to-many with packages (package_tags) and destinations (destination_tags)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub slug: String, // 'playa', 'aventura', 'romantico'
    pub name: String, // 'Playa', 'Aventura', 'Romántico'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Helper struct for batch-loading tags with the id of the row they tag.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagWithOwner {
    pub owner_id: Uuid,
    #[sqlx(flatten)]
    pub tag: Tag,
}

impl Tag {
    /// Find all tags ordered by name
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: TagId, pool: &PgPool) -> Result<Self> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(tag)
    }

    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(tag)
    }

    /// Resolve slugs to tags; unknown slugs are skipped.
    pub async fn find_by_slugs(slugs: &[String], pool: &PgPool) -> Result<Vec<Self>> {
        let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE slug = ANY($1) ORDER BY name")
            .bind(slugs)
            .fetch_all(pool)
            .await?;
        Ok(tags)
    }

    pub async fn create(slug: &str, name: &str, pool: &PgPool) -> Result<Self> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (id, slug, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(TagId::new())
        .bind(slug)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(tag)
    }

    /// Insert or refresh the name of the tag with this slug
    pub async fn upsert(slug: &str, name: &str, pool: &PgPool) -> Result<Self> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (id, slug, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(TagId::new())
        .bind(slug)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(tag)
    }

    pub async fn update(
        id: TagId,
        slug: Option<&str>,
        name: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags SET
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(slug)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(tag)
    }

    /// Delete a tag (join rows cascade). Returns false when nothing matched.
    pub async fn delete(id: TagId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Associations
    // =========================================================================

    pub async fn find_for_package(package_id: PackageId, pool: &PgPool) -> Result<Vec<Self>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.*
            FROM tags t
            INNER JOIN package_tags pt ON pt.tag_id = t.id
            WHERE pt.package_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(package_id)
        .fetch_all(pool)
        .await?;
        Ok(tags)
    }

    pub async fn find_for_destination(
        destination_id: DestinationId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.*
            FROM tags t
            INNER JOIN destination_tags dt ON dt.tag_id = t.id
            WHERE dt.destination_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(destination_id)
        .fetch_all(pool)
        .await?;
        Ok(tags)
    }

    /// Batch-load tags for a page of packages (avoids one query per card).
    pub async fn find_for_package_ids(
        package_ids: &[PackageId],
        pool: &PgPool,
    ) -> Result<Vec<TagWithOwner>> {
        sqlx::query_as::<_, TagWithOwner>(
            r#"
            SELECT pt.package_id AS owner_id, t.*
            FROM tags t
            INNER JOIN package_tags pt ON pt.tag_id = t.id
            WHERE pt.package_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(package_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_destination_ids(
        destination_ids: &[DestinationId],
        pool: &PgPool,
    ) -> Result<Vec<TagWithOwner>> {
        sqlx::query_as::<_, TagWithOwner>(
            r#"
            SELECT dt.destination_id AS owner_id, t.*
            FROM tags t
            INNER JOIN destination_tags dt ON dt.tag_id = t.id
            WHERE dt.destination_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(destination_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the full tag set of a package in one transaction
    pub async fn replace_for_package(
        package_id: PackageId,
        tag_ids: &[TagId],
        pool: &PgPool,
    ) -> Result<()> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM package_tags WHERE package_id = $1")
            .bind(package_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO package_tags (package_id, tag_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(package_id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replace the full tag set of a destination in one transaction
    pub async fn replace_for_destination(
        destination_id: DestinationId,
        tag_ids: &[TagId],
        pool: &PgPool,
    ) -> Result<()> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM destination_tags WHERE destination_id = $1")
            .bind(destination_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO destination_tags (destination_id, tag_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(destination_id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Group batch-loaded tags by owner id.
pub fn group_by_owner(rows: Vec<TagWithOwner>) -> std::collections::HashMap<Uuid, Vec<Tag>> {
    let mut grouped: std::collections::HashMap<Uuid, Vec<Tag>> = std::collections::HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(row.tag);
    }
    grouped
}
