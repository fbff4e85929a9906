use uuid::Uuid;

use crate::{
    models::blog_post::{BlogPost, BlogPostView},
    repositories::{blog_post_repo::BlogPostRepository, PostgresRepo},
    services::render,
    Error, Result,
};

#[derive(Clone)]
pub struct BlogPostsService {
    repo: PostgresRepo,
}

impl BlogPostsService {
    pub fn new(repo: PostgresRepo) -> Self {
        Self { repo }
    }

    pub async fn list_published(&self) -> Result<Vec<BlogPost>> {
        let posts = self.repo.list_published().await?;

        Ok(posts)
    }

    /// Fetches a published post and renders its body to HTML. Unknown ids and
    /// ids that are not UUIDs both surface as not-found.
    pub async fn get_post(&self, post_id: &str) -> Result<BlogPostView> {
        let post_id = Uuid::parse_str(post_id).map_err(|_| Error::NotFound)?;

        let post = self
            .repo
            .find_published_by_id(post_id)
            .await?
            .ok_or(Error::NotFound)?;

        let content_html = render::render_html(&post.content);

        Ok(BlogPostView { post, content_html })
    }
}
