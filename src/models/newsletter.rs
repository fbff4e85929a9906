use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "subscribedAt")]
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}
