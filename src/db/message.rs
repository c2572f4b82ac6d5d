use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn insert(pool: &PgPool, message: models::Message) -> Result<models::Message, String> {
    let query_span = tracing::info_span!("Saving new message into the database");
    sqlx::query(
        r#"
        INSERT INTO messages (id, conversation_id, role, content, file_url, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(message.id)
    .bind(message.conversation_id)
    .bind(message.role)
    .bind(&message.content)
    .bind(&message.file_url)
    .bind(message.created_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(move |_| message)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Full transcript in chronological order.
pub async fn fetch_by_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Vec<models::Message>, String> {
    let query_span = tracing::info_span!("Fetch messages by conversation id.");
    sqlx::query_as::<_, models::Message>(
        r#"
        SELECT *
        FROM messages
        WHERE conversation_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch messages, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
