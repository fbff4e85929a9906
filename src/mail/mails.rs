use super::sendmail::send_email;
use crate::{models::contact::ContactSubmission, services::render::escape_html, Result};

const CONTACT_NOTIFICATION_TEMPLATE: &str = include_str!("templates/Contact-notification.html");
const NEWSLETTER_WELCOME_TEMPLATE: &str = include_str!("templates/Newsletter-welcome.html");

pub async fn send_contact_notification(
    to_email: &str,
    submission: &ContactSubmission,
) -> Result<()> {
    let subject = format!("New contact submission from {}", submission.name);
    let placeholders = vec![
        ("{{name}}".to_string(), escape_html(&submission.name)),
        ("{{email}}".to_string(), escape_html(&submission.email)),
        (
            "{{subject}}".to_string(),
            escape_html(submission.subject.as_deref().unwrap_or("(none)")),
        ),
        ("{{message}}".to_string(), escape_html(&submission.message)),
    ];

    send_email(
        to_email,
        &subject,
        CONTACT_NOTIFICATION_TEMPLATE,
        &placeholders,
    )
    .await
}

pub async fn send_newsletter_welcome(to_email: &str) -> Result<()> {
    let subject = "Welcome to the Apex Advisory newsletter";
    let placeholders = vec![("{{email}}".to_string(), escape_html(to_email))];

    send_email(to_email, subject, NEWSLETTER_WELCOME_TEMPLATE, &placeholders).await
}
