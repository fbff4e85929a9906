use std::env;

/// Process-wide configuration, read from the environment once at startup and
/// passed into the application state. Request handlers never read env vars.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    /// Static key for the blog-post webhook. Absent disables the API-key
    /// authenticator, leaving only bearer tokens.
    pub webhook_api_key: Option<String>,
    /// Where contact-form notifications are mailed. Absent disables them.
    pub contact_notify_email: Option<String>,
}

impl Config {
    pub fn init() -> Config {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid port number");
        let webhook_api_key = env::var("WEBHOOK_API_KEY").ok().filter(|k| !k.is_empty());
        let contact_notify_email = env::var("CONTACT_NOTIFY_EMAIL")
            .ok()
            .filter(|e| !e.is_empty());

        Config {
            database_url,
            jwt_secret,
            port,
            webhook_api_key,
            contact_notify_email,
        }
    }
}
