use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::articles::repo::{Article, ArticleCategory, NewArticle};

const EXCERPT_CHARS: usize = 150;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
}

#[derive(Debug, Serialize)]
pub struct ArticleListItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub category: ArticleCategory,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<Article> for ArticleListItem {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            author_id: a.author_id,
            title: a.title,
            excerpt: excerpt(&a.content),
            category: a.category,
            image_url: a.image_url,
            created_at: a.created_at,
        }
    }
}

/// First 150 characters of the content, with a trailing ellipsis when
/// anything was cut off.
fn excerpt(content: &str) -> String {
    if content.chars().count() > EXCERPT_CHARS {
        let head: String = content.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub image_url: Option<String>,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(())
    }

    pub fn into_new_article(self) -> NewArticle {
        NewArticle {
            title: self.title.trim().to_string(),
            content: self.content,
            category: self.category,
            image_url: self.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_returned_whole() {
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn exactly_150_chars_gets_no_ellipsis() {
        let content = "x".repeat(150);
        assert_eq!(excerpt(&content), content);
    }

    #[test]
    fn long_content_is_cut_at_150_chars() {
        let content = "y".repeat(200);
        let e = excerpt(&content);
        assert_eq!(e.chars().count(), 153);
        assert!(e.ends_with("..."));
    }

    #[test]
    fn excerpt_respects_multibyte_boundaries() {
        let content = "é".repeat(160);
        let e = excerpt(&content);
        assert!(e.ends_with("..."));
        assert_eq!(e.chars().count(), 153);
    }

    #[test]
    fn category_uses_lowercase_wire_format() {
        let json = serde_json::to_string(&ArticleCategory::Fitness).unwrap();
        assert_eq!(json, "\"fitness\"");
        let back: ArticleCategory = serde_json::from_str("\"recipes\"").unwrap();
        assert_eq!(back, ArticleCategory::Recipes);
    }

    #[test]
    fn create_request_requires_title_and_content() {
        let r = CreateArticleRequest {
            title: " ".into(),
            content: "body".into(),
            category: ArticleCategory::Nutrition,
            image_url: None,
        };
        assert!(r.validate().is_err());

        let r = CreateArticleRequest {
            title: "Eating well".into(),
            content: "".into(),
            category: ArticleCategory::Nutrition,
            image_url: None,
        };
        assert!(r.validate().is_err());
    }
}
