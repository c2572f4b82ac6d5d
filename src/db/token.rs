use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn insert(pool: &PgPool, token: models::UserToken) -> Result<models::UserToken, String> {
    let query_span = tracing::info_span!("Saving new session token into the database");
    sqlx::query(
        r#"
        INSERT INTO user_tokens (id, user_id, token, created_at, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(token.id)
    .bind(token.user_id)
    .bind(&token.token)
    .bind(token.created_at)
    .bind(token.expires_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(move |_| token)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Session row for the token, ignoring rows that have already expired.
pub async fn fetch_active(
    pool: &PgPool,
    token: &str,
    user_id: Uuid,
) -> Result<Option<models::UserToken>, String> {
    let query_span = tracing::info_span!("Fetch active session token.");
    sqlx::query_as::<_, models::UserToken>(
        r#"
        SELECT *
        FROM user_tokens
        WHERE token = $1 AND user_id = $2 AND expires_at > NOW()
        LIMIT 1
        "#,
    )
    .bind(token)
    .bind(user_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch session token, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn delete(pool: &PgPool, token: &str, user_id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Deleting session token.");
    sqlx::query(
        r#"
        DELETE FROM user_tokens
        WHERE token = $1 AND user_id = $2
        "#,
    )
    .bind(token)
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
