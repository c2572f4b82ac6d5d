mod conversation;
mod message;
mod project;
mod token;
mod user;

pub use conversation::*;
pub use message::*;
pub use project::*;
pub use token::*;
pub use user::*;
