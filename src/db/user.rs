use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by id.");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT *
        FROM users
        WHERE id = $1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by email.");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT *
        FROM users
        WHERE email = $1
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user by email, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// First user colliding with any of the unique registration fields.
/// The caller inspects which field matched to phrase the conflict.
pub async fn fetch_conflicting(
    pool: &PgPool,
    email: &str,
    username: &str,
    uid: &str,
) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Check registration fields for conflicts.");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT *
        FROM users
        WHERE email = $1 OR username = $2 OR uid = $3
        LIMIT 1
        "#,
    )
    .bind(email)
    .bind(username)
    .bind(uid)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to check registration conflicts, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query(
        r#"
        INSERT INTO users (id, uid, username, email, password_hash, phone, role, balance,
                           is_first_login, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(user.id)
    .bind(&user.uid)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.phone)
    .bind(&user.role)
    .bind(user.balance)
    .bind(user.is_first_login)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(move |_| {
        tracing::info!("New user {} has been saved to database", user.id);
        user
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn clear_first_login(pool: &PgPool, id: Uuid) -> Result<(), String> {
    let query_span = tracing::info_span!("Clearing first login flag.");
    sqlx::query(
        r#"
        UPDATE users
        SET is_first_login = FALSE, updated_at = NOW()
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
