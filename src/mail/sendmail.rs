use crate::Result;
use lettre::{
    message::{header, Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use std::env::var;
use tracing::{error, info};

/// Sends an HTML email over SMTP. Mail is best-effort notification plumbing:
/// missing SMTP configuration or a transport failure is logged and swallowed
/// so it can never fail the request that triggered it.
pub async fn send_email(
    to: &str,
    subject: &str,
    template: &str,
    placeholders: &[(String, String)],
) -> Result<()> {
    let (Ok(smtp_username), Ok(smtp_password), Ok(smtp_server)) = (
        var("SMTP_USERNAME"),
        var("SMTP_PASSWORD"),
        var("SMTP_SERVER"),
    ) else {
        info!("SMTP not configured, skipping email to {to}");
        return Ok(());
    };
    let smtp_port: u16 = var("SMTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(587);

    let mut html_body = template.to_string();
    for (k, v) in placeholders {
        html_body = html_body.replace(k, v);
    }

    let Ok(from) = smtp_username.parse::<Mailbox>() else {
        error!("Invalid SMTP sender address {smtp_username}");
        return Ok(());
    };
    let Ok(to_addr) = to.parse::<Mailbox>() else {
        error!("Invalid recipient address {to}");
        return Ok(());
    };

    let email = match Message::builder()
        .from(from)
        .to(to_addr)
        .subject(subject)
        .singlepart(
            SinglePart::builder()
                .header(header::ContentType::TEXT_HTML)
                .body(html_body),
        ) {
        Ok(email) => email,
        Err(err) => {
            error!("Could not build email message for {to}: {err:?}");
            return Ok(());
        }
    };

    let creds = Credentials::new(smtp_username.clone(), smtp_password);
    let mailer = match SmtpTransport::starttls_relay(&smtp_server) {
        Ok(builder) => builder.credentials(creds).port(smtp_port).build(),
        Err(err) => {
            error!("Failed to build SMTP transport: {err:?}");
            return Ok(());
        }
    };

    // SmtpTransport::send is blocking; keep it off the async worker threads.
    match tokio::task::spawn_blocking(move || mailer.send(&email)).await {
        Ok(Ok(_)) => info!("Email sent to {to}"),
        Ok(Err(err)) => error!("Failed to send email to {to}: {err:?}"),
        Err(err) => error!("Email send task failed for {to}: {err:?}"),
    }

    Ok(())
}
