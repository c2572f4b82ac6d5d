use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
struct DeletedProject {
    id: Uuid,
}

/// Conversations assigned to the project survive; the FK nulls their
/// `project_id`.
#[tracing::instrument(name = "Delete project.")]
#[delete("/projects/{id}")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::project::delete(pg_pool.get_ref(), id, user.id)
        .await
        .map_err(|err| JsonResponse::<DeletedProject>::build().internal_server_error(err))
        .and_then(|deleted| match deleted {
            true => Ok(JsonResponse::build()
                .set_data(DeletedProject { id })
                .ok("Project deleted")),
            false => Err(JsonResponse::<DeletedProject>::build().not_found("Project not found")),
        })
}
