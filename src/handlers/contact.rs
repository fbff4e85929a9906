use std::sync::Arc;

use axum::{
    http::StatusCode, response::IntoResponse, routing::post, Extension, Json, Router,
};
use validator::Validate;

use crate::{
    models::{contact::CreateContactDto, response::Response},
    AppState, Result,
};

pub fn contact_handler() -> Router {
    Router::new().route("/", post(submit_contact))
}

async fn submit_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(contact): Json<CreateContactDto>,
) -> Result<impl IntoResponse> {
    contact.validate()?;

    app_state.contact_service.submit(contact).await?;

    Ok((
        StatusCode::CREATED,
        Json(Response {
            status: "success",
            message: "Thanks for reaching out! We will get back to you shortly.".to_string(),
        }),
    ))
}
