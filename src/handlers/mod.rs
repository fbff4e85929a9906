pub mod contact;
pub mod newsletter;
pub mod posts;
pub mod webhook;
