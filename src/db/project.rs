use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<models::Project>, String> {
    let query_span = tracing::info_span!("Fetch project by id.");
    sqlx::query_as::<_, models::Project>(
        r#"
        SELECT *
        FROM projects
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
        tracing::error!("Failed to fetch project, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<models::Project>, String> {
    let query_span = tracing::info_span!("Fetch projects by user id.");
    sqlx::query_as::<_, models::Project>(
        r#"
        SELECT *
        FROM projects
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch projects, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, project: models::Project) -> Result<models::Project, String> {
    let query_span = tracing::info_span!("Saving new project into the database");
    sqlx::query(
        r#"
        INSERT INTO projects (id, user_id, name, icon, color, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(project.id)
    .bind(project.user_id)
    .bind(&project.name)
    .bind(&project.icon)
    .bind(&project.color)
    .bind(project.created_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(move |_| project)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Partial update; absent fields keep their stored value.
pub async fn update_fields(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    name: Option<String>,
    icon: Option<String>,
    color: Option<String>,
) -> Result<(), String> {
    let query_span = tracing::info_span!("Updating project.");
    sqlx::query(
        r#"
        UPDATE projects
        SET name = COALESCE($3, name),
            icon = COALESCE($4, icon),
            color = COALESCE($5, color)
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(icon)
    .bind(color)
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
    let query_span = tracing::info_span!("Deleting project.");
    sqlx::query(
        r#"
        DELETE FROM projects
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
