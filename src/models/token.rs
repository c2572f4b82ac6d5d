use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Server-side session record. A bearer token is only honoured while a
/// matching row exists and has not expired.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UserToken {
    pub fn new(user_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            created_at: Utc::now(),
            expires_at,
        }
    }
}
