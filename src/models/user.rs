use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const DEFAULT_ROLE: &str = "Customer";
pub const OPENING_BALANCE: f64 = 100_000.0;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub uid: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub role: String,
    pub balance: f64,
    pub is_first_login: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Fresh customer account with the simulated opening balance.
    pub fn new(
        uid: String,
        username: String,
        email: String,
        password_hash: String,
        phone: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            uid,
            username,
            email,
            password_hash,
            phone,
            role: DEFAULT_ROLE.to_string(),
            balance: OPENING_BALANCE,
            is_first_login: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Identity carried through the request extensions once the session
/// middleware has validated the bearer cookie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub uid: String,
    pub username: String,
    pub email: String,
    pub role: String,
}
