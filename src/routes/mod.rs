pub mod auth;
pub(crate) mod chat;
pub mod conversation;
pub mod health_checks;
pub mod project;
pub(crate) mod user;

pub use health_checks::*;
