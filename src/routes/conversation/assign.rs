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
#[serde(rename_all = "camelCase")]
struct AssignedConversation {
    id: Uuid,
    project_id: Option<Uuid>,
}

#[tracing::instrument(name = "Assign conversation to project.")]
#[put("/conversations/{id}/project")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::conversation::AssignForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let project_id = form.project_id;

    db::conversation::fetch(pg_pool.get_ref(), id, user.id)
        .await
        .map_err(|err| JsonResponse::<AssignedConversation>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<AssignedConversation>::build().not_found("Conversation not found")
        })?;

    if let Some(project_id) = project_id {
        db::project::fetch(pg_pool.get_ref(), project_id, user.id)
            .await
            .map_err(|err| {
                JsonResponse::<AssignedConversation>::build().internal_server_error(err)
            })?
            .ok_or_else(|| {
                JsonResponse::<AssignedConversation>::build().not_found("Project not found")
            })?;
    }

    db::conversation::assign_project(pg_pool.get_ref(), id, user.id, project_id)
        .await
        .map(|_| {
            JsonResponse::build()
                .set_data(AssignedConversation { id, project_id })
                .ok("Conversation project updated")
        })
        .map_err(|err| JsonResponse::<AssignedConversation>::build().internal_server_error(err))
}
