use std::sync::Arc;

use axum::{
    http::StatusCode, response::IntoResponse, routing::post, Extension, Json, Router,
};
use validator::Validate;

use crate::{
    models::{newsletter::SubscribeDto, response::Response},
    AppState, Result,
};

pub fn newsletter_handler() -> Router {
    Router::new().route("/subscribe", post(subscribe))
}

async fn subscribe(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(subscribe): Json<SubscribeDto>,
) -> Result<impl IntoResponse> {
    subscribe.validate()?;

    // A duplicate subscription is a success from the visitor's point of view.
    let response = match app_state
        .newsletter_service
        .subscribe(&subscribe.email)
        .await?
    {
        Some(_) => (
            StatusCode::CREATED,
            Json(Response {
                status: "success",
                message: "Subscribed! Welcome aboard.".to_string(),
            }),
        ),
        None => (
            StatusCode::OK,
            Json(Response {
                status: "success",
                message: "You are already subscribed.".to_string(),
            }),
        ),
    };

    Ok(response)
}
