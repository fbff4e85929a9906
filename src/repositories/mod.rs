use sqlx::PgPool;

pub mod blog_post_repo;
pub mod contact_repo;
pub mod newsletter_repo;

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
