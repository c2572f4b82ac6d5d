use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<models::Conversation>, String> {
    let query_span = tracing::info_span!("Fetch conversation by id.");
    sqlx::query_as::<_, models::Conversation>(
        r#"
        SELECT *
        FROM conversations
        WHERE id = $1 AND user_id = $2
        LIMIT 1
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch conversation, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Most recently active conversations first, capped at 100.
pub async fn fetch_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<models::Conversation>, String> {
    let query_span = tracing::info_span!("Fetch conversations by user id.");
    sqlx::query_as::<_, models::Conversation>(
        r#"
        SELECT *
        FROM conversations
        WHERE user_id = $1
        ORDER BY updated_at DESC
        LIMIT 100
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch conversations, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(
    pool: &PgPool,
    conversation: models::Conversation,
) -> Result<models::Conversation, String> {
    let query_span = tracing::info_span!("Saving new conversation into the database");
    sqlx::query(
        r#"
        INSERT INTO conversations (id, user_id, project_id, title, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(conversation.id)
    .bind(conversation.user_id)
    .bind(conversation.project_id)
    .bind(&conversation.title)
    .bind(conversation.created_at)
    .bind(conversation.updated_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(move |_| conversation)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn rename(pool: &PgPool, id: Uuid, user_id: Uuid, title: &str) -> Result<(), String> {
    let query_span = tracing::info_span!("Renaming conversation.");
    sqlx::query(
        r#"
        UPDATE conversations
        SET title = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

/// Bump the activity timestamp after new messages land.
pub async fn touch(pool: &PgPool, id: Uuid) -> Result<(), String> {
    let query_span = tracing::info_span!("Touching conversation.");
    sqlx::query(
        r#"
        UPDATE conversations
        SET updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

pub async fn assign_project(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    project_id: Option<Uuid>,
) -> Result<(), String> {
    let query_span = tracing::info_span!("Assigning conversation to project.");
    sqlx::query(
        r#"
        UPDATE conversations
        SET project_id = $3
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(project_id)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Deleting conversation.");
    sqlx::query(
        r#"
        DELETE FROM conversations
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|result| result.rows_affected() > 0)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to delete".to_string()
    })
}
