use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedPostData {
    pub id: Uuid,
    pub title: String,
}

/// Body of the 201 returned to the webhook caller.
#[derive(Debug, Serialize)]
pub struct WebhookCreatedResponse {
    pub success: bool,
    pub message: String,
    pub data: CreatedPostData,
}
