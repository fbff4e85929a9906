use crate::{
    mail::mails::send_newsletter_welcome,
    models::newsletter::NewsletterSubscriber,
    repositories::{newsletter_repo::NewsletterRepository, PostgresRepo},
    Result,
};

#[derive(Clone)]
pub struct NewsletterService {
    repo: PostgresRepo,
}

impl NewsletterService {
    pub fn new(repo: PostgresRepo) -> Self {
        Self { repo }
    }

    /// Returns `None` for an address that was already subscribed; the welcome
    /// mail only goes out on a fresh subscription.
    pub async fn subscribe(&self, email: &str) -> Result<Option<NewsletterSubscriber>> {
        let subscriber = self.repo.insert_subscriber(email).await?;

        if let Some(subscriber) = &subscriber {
            send_newsletter_welcome(&subscriber.email).await?;
        }

        Ok(subscriber)
    }
}
