pub mod conversation;
pub mod message;
pub mod project;
pub mod token;
pub mod user;
