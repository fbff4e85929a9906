use super::PostgresRepo;
use crate::{models::newsletter::NewsletterSubscriber, Result};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait NewsletterRepository: Sync + Send {
    /// Inserts a subscriber, returning `None` when the email is already
    /// subscribed. Duplicate subscriptions are not an error.
    async fn insert_subscriber(&self, email: &str) -> Result<Option<NewsletterSubscriber>>;
}

#[async_trait]
impl NewsletterRepository for PostgresRepo {
    async fn insert_subscriber(&self, email: &str) -> Result<Option<NewsletterSubscriber>> {
        let id = Uuid::now_v7();

        let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
            r#"
            INSERT INTO newsletter_subscribers (id, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, subscribed_at
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscriber)
    }
}
