pub mod auth;
pub mod conversation;
pub mod project;
