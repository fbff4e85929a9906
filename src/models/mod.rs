pub mod blog_post;
pub mod contact;
pub mod newsletter;
pub mod response;
