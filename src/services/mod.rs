pub mod auth;
pub mod contact;
pub mod newsletter;
pub mod posts;
pub mod render;
pub mod webhook;
