use crate::{
    mail::mails::send_contact_notification,
    models::contact::{ContactSubmission, CreateContactDto},
    repositories::{contact_repo::ContactRepository, PostgresRepo},
    Result,
};

#[derive(Clone)]
pub struct ContactService {
    repo: PostgresRepo,
    notify_email: Option<String>,
}

impl ContactService {
    pub fn new(repo: PostgresRepo, notify_email: Option<String>) -> Self {
        Self { repo, notify_email }
    }

    /// Persists the submission, then mails the owner. The notification is
    /// best-effort; a mail failure never fails the request.
    pub async fn submit(&self, contact: CreateContactDto) -> Result<ContactSubmission> {
        let submission = self
            .repo
            .insert_submission(
                &contact.name,
                &contact.email,
                contact.subject.as_deref(),
                &contact.message,
            )
            .await?;

        if let Some(to) = &self.notify_email {
            send_contact_notification(to, &submission).await?;
        }

        Ok(submission)
    }
}
