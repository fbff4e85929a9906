use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(rename = "authorId")]
    pub author_id: Option<Uuid>,
    pub published: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A blog post that has passed webhook validation and sanitization and is
/// ready to be inserted. Title and content are trimmed, non-empty and
/// length-capped; the excerpt never exceeds 500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author_id: Option<Uuid>,
    pub published: bool,
}

/// Post detail returned by the public read path, with the body rendered to
/// HTML alongside the raw text.
#[derive(Debug, Serialize)]
pub struct BlogPostView {
    #[serde(flatten)]
    pub post: BlogPost,
    #[serde(rename = "contentHtml")]
    pub content_html: String,
}
