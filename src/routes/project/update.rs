use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{put, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
struct UpdatedProject {
    id: Uuid,
}

/// Partial update. Fields that are absent or fail validation are left
/// untouched; a request changing nothing still answers 200.
#[tracing::instrument(name = "Update project.")]
#[put("/projects/{id}")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::project::UpdateForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::project::fetch(pg_pool.get_ref(), id, user.id)
        .await
        .map_err(|err| JsonResponse::<UpdatedProject>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<UpdatedProject>::build().not_found("Project not found"))?;

    if !form.is_empty() {
        db::project::update_fields(
            pg_pool.get_ref(),
            id,
            user.id,
            form.cleaned_name(),
            form.cleaned_icon(),
            form.cleaned_color(),
        )
        .await
        .map_err(|err| JsonResponse::<UpdatedProject>::build().internal_server_error(err))?;
    }

    Ok(JsonResponse::build()
        .set_data(UpdatedProject { id })
        .ok("Project updated"))
}
