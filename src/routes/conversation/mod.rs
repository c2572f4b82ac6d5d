pub mod assign;
pub mod delete;
pub mod get;
pub mod update;

pub use assign::*;
pub use delete::*;
pub use get::*;
pub use update::*;
