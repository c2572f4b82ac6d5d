use serde::Deserialize;
use serde_valid::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(min_length = 3)]
    #[validate(max_length = 50)]
    #[validate(pattern = r"^[a-zA-Z0-9_]+$")]
    pub uid: String,
    #[validate(min_length = 3)]
    #[validate(max_length = 50)]
    pub username: String,
    #[validate(pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$")]
    pub email: String,
    #[validate(min_length = 8)]
    #[validate(max_length = 100)]
    pub password: String,
    #[validate(min_length = 7)]
    #[validate(max_length = 20)]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[validate(pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$")]
    pub email: String,
    #[validate(min_length = 1)]
    pub password: String,
}
