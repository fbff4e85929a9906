use std::sync::Arc;

use axum::{
    extract::Path, http::StatusCode, response::IntoResponse, routing::get, Extension, Json, Router,
};

use crate::{AppState, Result};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/", get(get_posts))
        .route("/{id}", get(get_post))
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.list_published().await?;

    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(&post_id).await?;

    Ok((StatusCode::OK, Json(post)))
}
