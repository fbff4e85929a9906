use super::PostgresRepo;
use crate::{models::contact::ContactSubmission, Result};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ContactRepository: Sync + Send {
    async fn insert_submission(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<ContactSubmission>;
}

#[async_trait]
impl ContactRepository for PostgresRepo {
    async fn insert_submission(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<ContactSubmission> {
        let id = Uuid::now_v7();

        let submission = sqlx::query_as::<_, ContactSubmission>(
            r#"
            INSERT INTO contact_submissions (id, name, email, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, subject, message, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(submission)
    }
}
