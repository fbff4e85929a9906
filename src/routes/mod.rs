use std::{any::Any as StdAny, sync::Arc};

use axum::{
    http::Method,
    response::{IntoResponse, Response},
    Extension, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::{
    handlers::{
        contact::contact_handler, newsletter::newsletter_handler, posts::posts_handler,
        webhook::webhook_handler,
    },
    AppState, Error,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    // The webhook nest manages its own CORS headers; the browser-facing
    // routes share a permissive layer.
    let public_routes = Router::new()
        .nest("/posts", posts_handler())
        .nest("/contact", contact_handler())
        .nest("/newsletter", newsletter_handler())
        .layer(configure_cors());

    let api_route = Router::new()
        .merge(public_routes)
        .nest("/webhooks", webhook_handler())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(Extension(app_state));

    Router::new().nest("/api", api_route)
}

/// Last-resort boundary: nothing propagates uncaught to the platform. Panic
/// details stay in the server logs.
fn handle_panic(err: Box<dyn StdAny + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {detail}");

    Error::InternalServerError.into_response()
}

fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
