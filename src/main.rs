use std::sync::Arc;

use config::Config;
use repositories::PostgresRepo;
use routes::create_routes;
use services::{
    auth::{AuthService, WebhookAuth},
    contact::ContactService,
    newsletter::NewsletterService,
    posts::BlogPostsService,
    webhook::WebhookService,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod mail;
mod models;
mod repositories;
mod routes;
mod services;

#[derive(Clone)]
pub struct AppState {
    pub webhook_auth: WebhookAuth,
    pub webhook_service: WebhookService,
    pub posts_service: BlogPostsService,
    pub contact_service: ContactService,
    pub newsletter_service: NewsletterService,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!().run(&pool).await {
        println!("🔥 Failed to run database migrations: {:?}", err);
        std::process::exit(1);
    }

    let repo = PostgresRepo::new(pool);
    let auth_service = AuthService::new(config.jwt_secret.clone());

    let app_state = AppState {
        webhook_auth: WebhookAuth::new(config.webhook_api_key.clone(), auth_service),
        webhook_service: WebhookService::new(repo.clone()),
        posts_service: BlogPostsService::new(repo.clone()),
        contact_service: ContactService::new(repo.clone(), config.contact_notify_email.clone()),
        newsletter_service: NewsletterService::new(repo),
    };

    let app = create_routes(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port))
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}
