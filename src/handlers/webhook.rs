use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use serde_json::Value;
use tracing::warn;

use crate::{
    models::response::{CreatedPostData, WebhookCreatedResponse},
    AppState, Error, Result,
};

// Every webhook response carries these, success or failure, so the
// automation tools posting here can run from browser contexts too.
const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-headers",
        "authorization, x-client-info, apikey, content-type, x-api-key",
    ),
    ("access-control-allow-methods", "POST, OPTIONS"),
];

pub fn webhook_handler() -> Router {
    Router::new().route(
        "/blog-posts",
        post(ingest_blog_post)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// CORS preflight, answered before auth or any other logic runs.
async fn preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

async fn method_not_allowed() -> Response {
    with_cors(Error::MethodNotAllowed.into_response())
}

async fn ingest_blog_post(
    Extension(app_state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    with_cors(
        process_post(&app_state, &headers, &body)
            .await
            .map(IntoResponse::into_response)
            .unwrap_or_else(IntoResponse::into_response),
    )
}

/// The linear ingestion pipeline: authenticate, parse, validate, sanitize,
/// persist. Any failure short-circuits to an error response; the insert is
/// the single side effect and runs last.
async fn process_post(
    app_state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<impl IntoResponse> {
    let caller = app_state.webhook_auth.authenticate(headers)?;

    // The body arrives as raw bytes and is decoded and parsed here, after
    // auth, so a malformed payload (including non-UTF-8) is diagnosable in
    // our logs and still flows through the JSON error path instead of
    // disappearing inside a framework extractor.
    let body = String::from_utf8_lossy(body);
    let payload: Value = serde_json::from_str(&body).map_err(|err| {
        warn!("Webhook payload is not valid JSON: {err}");
        Error::BadRequest("Invalid JSON format".to_string())
    })?;

    let post = app_state
        .webhook_service
        .create_post(&payload, caller.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WebhookCreatedResponse {
            success: true,
            message: "Blog post created successfully".to_string(),
            data: CreatedPostData {
                id: post.id,
                title: post.title,
            },
        }),
    ))
}

fn with_cors(mut response: Response) -> Response {
    for (name, value) in CORS_HEADERS {
        response.headers_mut().insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::Config,
        repositories::PostgresRepo,
        services::{
            auth::{AuthService, WebhookAuth},
            contact::ContactService,
            newsletter::NewsletterService,
            posts::BlogPostsService,
            webhook::WebhookService,
        },
    };

    // Lazy pool: nothing connects unless a handler reaches the store, which
    // none of these requests should.
    fn test_app(api_key: Option<&str>) -> Router {
        let config = Config {
            database_url: "postgres://localhost/unreachable".to_string(),
            jwt_secret: "test-secret".to_string(),
            port: 8080,
            webhook_api_key: api_key.map(str::to_string),
            contact_notify_email: None,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let repo = PostgresRepo::new(pool);

        let app_state = AppState {
            webhook_auth: WebhookAuth::new(
                config.webhook_api_key.clone(),
                AuthService::new(config.jwt_secret.clone()),
            ),
            webhook_service: WebhookService::new(repo.clone()),
            posts_service: BlogPostsService::new(repo.clone()),
            contact_service: ContactService::new(repo.clone(), None),
            newsletter_service: NewsletterService::new(repo),
        };

        webhook_handler().layer(Extension(Arc::new(app_state)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn preflight_returns_cors_headers_and_empty_body() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/blog-posts")
            .body(Body::empty())
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
        assert_eq!(
            response.headers()["access-control-allow-headers"],
            HeaderValue::from_static(
                "authorization, x-client-info, apikey, content-type, x-api-key"
            )
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn non_post_method_returns_405() {
        let request = Request::builder()
            .method("GET")
            .uri("/blog-posts")
            .body(Body::empty())
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Method not allowed" })
        );
    }

    #[tokio::test]
    async fn missing_credentials_returns_401() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog-posts")
            .body(Body::from(r#"{"title":"T","content":"C"}"#))
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Unauthorized - API key or valid authentication required" })
        );
    }

    #[tokio::test]
    async fn wrong_api_key_and_bad_bearer_returns_401() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog-posts")
            .header("x-api-key", "wrong")
            .header("authorization", "Bearer garbage")
            .body(Body::from(r#"{"title":"T","content":"C"}"#))
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_json_returns_400_without_store_call() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog-posts")
            .header("x-api-key", "k")
            .body(Body::from("{not json"))
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid JSON format" })
        );
    }

    #[tokio::test]
    async fn non_utf8_body_gets_json_error_and_cors_headers() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog-posts")
            .header("x-api-key", "k")
            .body(Body::from(vec![0xff, 0xfe, 0xfd]))
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid JSON format" })
        );
    }

    #[tokio::test]
    async fn empty_fields_return_400_with_missing_fields_message() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog-posts")
            .header("x-api-key", "k")
            .body(Body::from(r#"{"title":"   ","content":"valid"}"#))
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing required fields: title and content cannot be empty" })
        );
    }

    #[tokio::test]
    async fn error_responses_also_carry_cors_headers() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog-posts")
            .body(Body::empty())
            .unwrap();

        let response = test_app(Some("k")).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
    }
}
