use std::sync::Arc;

use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn decode_token<T: Into<String>>(&self, token: T) -> Result<Uuid> {
        let decoded = decode::<Claims>(
            &token.into(),
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| Error::Unauthorized)?;

        Uuid::parse_str(&decoded.claims.sub).map_err(|_| Error::Unauthorized)
    }
}

/// Identity resolved for a webhook caller. The static-key path attaches no
/// user, so posts created through it carry a null author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<Uuid>,
}

/// One authentication strategy. Returns `None` when the request does not
/// satisfy this strategy, letting the next strategy in the chain try.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Option<Caller>;
}

/// Matches an exact `X-API-Key` header against the configured webhook key.
pub struct ApiKeyAuthenticator {
    key: String,
}

impl Authenticator for ApiKeyAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Option<Caller> {
        let presented = headers.get("x-api-key").and_then(|v| v.to_str().ok())?;

        if presented == self.key {
            Some(Caller { user_id: None })
        } else {
            None
        }
    }
}

/// Verifies an `Authorization: Bearer <jwt>` token and resolves the caller's
/// user id from it.
pub struct BearerAuthenticator {
    auth_service: AuthService,
}

impl Authenticator for BearerAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Option<Caller> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))?;

        let user_id = self.auth_service.decode_token(token).ok()?;

        Some(Caller {
            user_id: Some(user_id),
        })
    }
}

/// Ordered chain of webhook authenticators; the first strategy that matches
/// wins. A wrong API key falls through to the bearer check, and a bad bearer
/// token falls through to the unauthorized rejection.
#[derive(Clone)]
pub struct WebhookAuth {
    authenticators: Vec<Arc<dyn Authenticator>>,
}

impl WebhookAuth {
    pub fn new(api_key: Option<String>, auth_service: AuthService) -> Self {
        let mut authenticators: Vec<Arc<dyn Authenticator>> = Vec::new();

        if let Some(key) = api_key {
            authenticators.push(Arc::new(ApiKeyAuthenticator { key }));
        }
        authenticators.push(Arc::new(BearerAuthenticator { auth_service }));

        Self { authenticators }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Caller> {
        self.authenticators
            .iter()
            .find_map(|a| a.authenticate(headers))
            .ok_or(Error::Unauthorized)
    }
}
