use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "article_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    Nutrition,
    Meals,
    Healthy,
    Recipes,
    Fitness,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub image_url: Option<String>,
}

impl Article {
    /// Published articles, newest first.
    pub async fn list_published(db: &PgPool) -> anyhow::Result<Vec<Article>> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, author_id, title, content, category, image_url, is_published,
                   created_at, updated_at
            FROM articles
            WHERE is_published = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, author_id: Uuid, new: NewArticle) -> anyhow::Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (author_id, title, content, category, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, author_id, title, content, category, image_url, is_published,
                      created_at, updated_at
            "#,
        )
        .bind(author_id)
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.category)
        .bind(&new.image_url)
        .fetch_one(db)
        .await?;
        Ok(article)
    }
}
