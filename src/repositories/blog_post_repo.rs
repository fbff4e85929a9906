use super::PostgresRepo;
use crate::{
    models::blog_post::{BlogPost, NewBlogPost},
    Result,
};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait BlogPostRepository: Sync + Send {
    async fn insert_post(&self, new_post: NewBlogPost) -> Result<BlogPost>;
    async fn list_published(&self) -> Result<Vec<BlogPost>>;
    async fn find_published_by_id(&self, post_id: Uuid) -> Result<Option<BlogPost>>;
}

#[async_trait]
impl BlogPostRepository for PostgresRepo {
    async fn insert_post(&self, new_post: NewBlogPost) -> Result<BlogPost> {
        let id = Uuid::now_v7();

        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (id, title, content, excerpt, author_id, published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, content, excerpt, author_id, published, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(&new_post.excerpt)
        .bind(new_post.author_id)
        .bind(new_post.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, content, excerpt, author_id, published, created_at, updated_at
            FROM blog_posts
            WHERE published = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_published_by_id(&self, post_id: Uuid) -> Result<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, content, excerpt, author_id, published, created_at, updated_at
            FROM blog_posts
            WHERE id = $1 AND published = TRUE
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }
}
