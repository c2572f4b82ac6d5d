pub mod json;
pub mod password;
pub mod sanitizer;
pub mod token;
pub mod uploads;

pub use json::JsonResponse;
