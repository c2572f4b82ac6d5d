use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(user_id: Uuid, name: String, icon: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            icon,
            color,
            created_at: Utc::now(),
        }
    }
}
