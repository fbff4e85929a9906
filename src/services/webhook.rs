use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use crate::{
    models::blog_post::{BlogPost, NewBlogPost},
    repositories::{blog_post_repo::BlogPostRepository, PostgresRepo},
    Error, Result,
};

const MAX_TITLE_CHARS: usize = 500;
const MAX_CONTENT_CHARS: usize = 100_000;
const MAX_EXCERPT_CHARS: usize = 500;
const DERIVED_EXCERPT_CHARS: usize = 150;

#[derive(Clone)]
pub struct WebhookService {
    repo: PostgresRepo,
}

impl WebhookService {
    pub fn new(repo: PostgresRepo) -> Self {
        Self { repo }
    }

    /// Validates and sanitizes the untrusted payload, then issues the single
    /// insert. Nothing is written unless every prior stage passes.
    pub async fn create_post(
        &self,
        payload: &Value,
        caller_user_id: Option<Uuid>,
    ) -> Result<BlogPost> {
        let new_post = sanitize_payload(payload, caller_user_id)?;

        match self.repo.insert_post(new_post).await {
            Ok(post) => Ok(post),
            Err(Error::DatabaseError(err)) => {
                // Store error codes stay in the server logs; the caller only
                // ever sees the generic failure message.
                let code = err
                    .as_database_error()
                    .and_then(|db| db.code().map(|c| c.into_owned()));
                error!(code = ?code, "Blog post insert failed");
                Err(Error::PostCreationFailed(err))
            }
            Err(err) => Err(err),
        }
    }
}

/// Coerces the loosely-typed JSON payload into a strict [`NewBlogPost`].
///
/// Non-string `title`/`content` count as empty, `published` must be the
/// literal boolean `true`, and the excerpt falls back to the first 150
/// characters of the content. The authenticated user id, when present, takes
/// precedence over any `author_id` in the payload.
pub fn sanitize_payload(payload: &Value, caller_user_id: Option<Uuid>) -> Result<NewBlogPost> {
    let title = coerce_string(payload.get("title"));
    let title = title.trim();
    let content = coerce_string(payload.get("content"));
    let content = content.trim();

    if title.is_empty() || content.is_empty() {
        return Err(Error::BadRequest(
            "Missing required fields: title and content cannot be empty".to_string(),
        ));
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(Error::BadRequest(
            "Title must be less than 500 characters".to_string(),
        ));
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(Error::BadRequest(
            "Content must be less than 100000 characters".to_string(),
        ));
    }

    let excerpt = match payload.get("excerpt").and_then(Value::as_str) {
        Some(supplied) if !supplied.trim().is_empty() => {
            truncate_chars(supplied.trim(), MAX_EXCERPT_CHARS)
        }
        _ => format!("{}...", truncate_chars(content, DERIVED_EXCERPT_CHARS)),
    };

    let author_id = caller_user_id.or_else(|| {
        payload
            .get("author_id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
    });

    let published = matches!(payload.get("published"), Some(Value::Bool(true)));

    Ok(NewBlogPost {
        title: truncate_chars(title, MAX_TITLE_CHARS),
        content: content.to_string(),
        excerpt,
        author_id,
        published,
    })
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn valid_payload_round_trips_fields() {
        let payload = json!({
            "title": "T",
            "content": "C",
            "excerpt": "E",
            "published": true,
        });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.content, "C");
        assert_eq!(post.excerpt, "E");
        assert!(post.published);
    }

    #[test]
    fn whitespace_only_title_counts_as_missing() {
        let payload = json!({ "title": "   ", "content": "valid" });

        let err = sanitize_payload(&payload, None).unwrap_err();
        assert!(matches!(
            err,
            Error::BadRequest(msg)
                if msg == "Missing required fields: title and content cannot be empty"
        ));
    }

    #[test]
    fn non_string_title_counts_as_missing() {
        let payload = json!({ "title": 42, "content": "valid" });

        assert!(matches!(
            sanitize_payload(&payload, None),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn absent_content_counts_as_missing() {
        let payload = json!({ "title": "valid" });

        assert!(matches!(
            sanitize_payload(&payload, None),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn title_over_500_chars_is_rejected() {
        let payload = json!({ "title": "x".repeat(501), "content": "valid" });

        let err = sanitize_payload(&payload, None).unwrap_err();
        assert!(matches!(
            err,
            Error::BadRequest(msg) if msg == "Title must be less than 500 characters"
        ));
    }

    #[test]
    fn title_of_exactly_500_chars_passes() {
        let payload = json!({ "title": "x".repeat(500), "content": "valid" });

        assert!(sanitize_payload(&payload, None).is_ok());
    }

    #[test]
    fn content_over_100000_chars_is_rejected() {
        let payload = json!({ "title": "T", "content": "x".repeat(100_001) });

        let err = sanitize_payload(&payload, None).unwrap_err();
        assert!(matches!(
            err,
            Error::BadRequest(msg) if msg == "Content must be less than 100000 characters"
        ));
    }

    #[test]
    fn content_of_exactly_100000_chars_passes() {
        let payload = json!({ "title": "T", "content": "x".repeat(100_000) });

        assert!(sanitize_payload(&payload, None).is_ok());
    }

    #[test]
    fn excerpt_derived_from_first_150_chars_of_content() {
        let content = "c".repeat(300);
        let payload = json!({ "title": "T", "content": content });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.excerpt, format!("{}...", "c".repeat(150)));
    }

    #[test]
    fn short_content_still_gets_ellipsis_excerpt() {
        let payload = json!({ "title": "T", "content": "short body" });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.excerpt, "short body...");
    }

    #[test]
    fn supplied_excerpt_is_trimmed_and_capped_at_500() {
        let payload = json!({
            "title": "T",
            "content": "C",
            "excerpt": format!("  {}  ", "e".repeat(600)),
        });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.excerpt, "e".repeat(500));
    }

    #[test]
    fn blank_supplied_excerpt_falls_back_to_derivation() {
        let payload = json!({ "title": "T", "content": "body text", "excerpt": "   " });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.excerpt, "body text...");
    }

    #[test]
    fn published_string_true_is_not_published() {
        let payload = json!({ "title": "T", "content": "C", "published": "true" });

        let post = sanitize_payload(&payload, None).unwrap();
        assert!(!post.published);
    }

    #[test]
    fn published_defaults_to_false() {
        let payload = json!({ "title": "T", "content": "C" });

        let post = sanitize_payload(&payload, None).unwrap();
        assert!(!post.published);
    }

    #[test]
    fn authenticated_user_id_wins_over_payload_author() {
        let caller = Uuid::now_v7();
        let payload_author = Uuid::now_v7();
        let payload = json!({
            "title": "T",
            "content": "C",
            "author_id": payload_author.to_string(),
        });

        let post = sanitize_payload(&payload, Some(caller)).unwrap();
        assert_eq!(post.author_id, Some(caller));
    }

    #[test]
    fn payload_author_used_without_authenticated_user() {
        let payload_author = Uuid::now_v7();
        let payload = json!({
            "title": "T",
            "content": "C",
            "author_id": payload_author.to_string(),
        });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.author_id, Some(payload_author));
    }

    #[test]
    fn unparsable_payload_author_defaults_to_null() {
        let payload = json!({ "title": "T", "content": "C", "author_id": "not-a-uuid" });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.author_id, None);
    }

    #[test]
    fn title_and_content_are_trimmed() {
        let payload = json!({ "title": "  T  ", "content": "  C  " });

        let post = sanitize_payload(&payload, None).unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.content, "C");
    }
}
