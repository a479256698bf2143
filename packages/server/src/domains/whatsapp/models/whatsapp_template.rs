use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::TemplateId;

/// What kind of item a template is written for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    #[default]
    General,
    Destination,
    Package,
    Offer,
    Event,
    Department,
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateCategory::General => write!(f, "general"),
            TemplateCategory::Destination => write!(f, "destination"),
            TemplateCategory::Package => write!(f, "package"),
            TemplateCategory::Offer => write!(f, "offer"),
            TemplateCategory::Event => write!(f, "event"),
            TemplateCategory::Department => write!(f, "department"),
        }
    }
}

impl std::str::FromStr for TemplateCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "general" => Ok(TemplateCategory::General),
            "destination" => Ok(TemplateCategory::Destination),
            "package" => Ok(TemplateCategory::Package),
            "offer" => Ok(TemplateCategory::Offer),
            "event" => Ok(TemplateCategory::Event),
            "department" => Ok(TemplateCategory::Department),
            _ => Err(anyhow::anyhow!("Invalid template category: {}", s)),
        }
    }
}

/// WhatsApp message template. At most one default per category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WhatsAppTemplate {
    pub id: TemplateId,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub body: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WhatsAppTemplate {
    pub fn category(&self) -> TemplateCategory {
        self.category.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTemplate {
    pub slug: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: TemplateCategory,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplate {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub category: Option<TemplateCategory>,
    pub body: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    pub category: Option<TemplateCategory>,
}

impl WhatsAppTemplate {
    pub async fn find_all(filter: &TemplateFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let templates = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM whatsapp_templates
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY category, is_default DESC, name
            "#,
        )
        .bind(filter.category.map(|c| c.to_string()))
        .fetch_all(pool)
        .await?;
        Ok(templates)
    }

    pub async fn find_by_id(id: TemplateId, pool: &PgPool) -> Result<Self> {
        let template =
            sqlx::query_as::<_, Self>("SELECT * FROM whatsapp_templates WHERE id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(template)
    }

    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let template =
            sqlx::query_as::<_, Self>("SELECT * FROM whatsapp_templates WHERE slug = $1")
                .bind(slug)
                .fetch_optional(pool)
                .await?;
        Ok(template)
    }

    pub async fn find_default(category: TemplateCategory, pool: &PgPool) -> Result<Option<Self>> {
        let template = sqlx::query_as::<_, Self>(
            "SELECT * FROM whatsapp_templates WHERE category = $1 AND is_default LIMIT 1",
        )
        .bind(category.to_string())
        .fetch_optional(pool)
        .await?;
        Ok(template)
    }

    async fn clear_default(
        category: &str,
        except: TemplateId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE whatsapp_templates
            SET is_default = false, updated_at = NOW()
            WHERE category = $1 AND is_default AND id <> $2
            "#,
        )
        .bind(category)
        .bind(except)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Insert a template. A new default takes the flag from the category's
    /// previous default in the same transaction. With `upsert` an existing
    /// slug is overwritten.
    pub async fn create(
        slug: &str,
        input: &CreateTemplate,
        upsert: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let id = TemplateId::new();
        let category = input.category.to_string();
        let mut tx = pool.begin().await?;

        if input.is_default {
            // Upserts keep the existing row's id; clear by slug instead.
            sqlx::query(
                r#"
                UPDATE whatsapp_templates
                SET is_default = false, updated_at = NOW()
                WHERE category = $1 AND is_default AND slug <> $2
                "#,
            )
            .bind(&category)
            .bind(slug)
            .execute(&mut *tx)
            .await?;
        }

        let conflict = if upsert {
            r#"ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                category = EXCLUDED.category,
                body = EXCLUDED.body,
                is_default = EXCLUDED.is_default,
                updated_at = NOW()"#
        } else {
            ""
        };
        let query = format!(
            r#"
            INSERT INTO whatsapp_templates (id, slug, name, category, body, is_default)
            VALUES ($1, $2, $3, $4, $5, $6)
            {}
            RETURNING *
            "#,
            conflict
        );
        let template = sqlx::query_as::<_, Self>(&query)
            .bind(id)
            .bind(slug)
            .bind(input.name.trim())
            .bind(&category)
            .bind(&input.body)
            .bind(input.is_default)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(template)
    }

    pub async fn update(id: TemplateId, input: &UpdateTemplate, pool: &PgPool) -> Result<Self> {
        let mut tx = pool.begin().await?;

        let current = sqlx::query_as::<_, Self>(
            "SELECT * FROM whatsapp_templates WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let category = input
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| current.category.clone());
        if input.is_default.unwrap_or(current.is_default) {
            Self::clear_default(&category, id, &mut tx).await?;
        }

        let template = sqlx::query_as::<_, Self>(
            r#"
            UPDATE whatsapp_templates SET
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                category = $4,
                body = COALESCE($5, body),
                is_default = COALESCE($6, is_default),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&category)
        .bind(&input.body)
        .bind(input.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(template)
    }

    pub async fn delete(id: TemplateId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM whatsapp_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_text_round_trips() {
        for category in [
            TemplateCategory::General,
            TemplateCategory::Destination,
            TemplateCategory::Package,
            TemplateCategory::Offer,
            TemplateCategory::Event,
            TemplateCategory::Department,
        ] {
            assert_eq!(category.to_string().parse::<TemplateCategory>().unwrap(), category);
        }
        assert!("promo".parse::<TemplateCategory>().is_err());
    }
}
