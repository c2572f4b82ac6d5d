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
struct RenamedConversation {
    id: Uuid,
    title: String,
}

#[tracing::instrument(name = "Rename conversation.")]
#[put("/conversations/{id}")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::conversation::RenameForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let title = form.cleaned_title().ok_or_else(|| {
        JsonResponse::<RenamedConversation>::build().bad_request("Title is required")
    })?;

    db::conversation::fetch(pg_pool.get_ref(), id, user.id)
        .await
        .map_err(|err| JsonResponse::<RenamedConversation>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<RenamedConversation>::build().not_found("Conversation not found")
        })?;

    db::conversation::rename(pg_pool.get_ref(), id, user.id, &title)
        .await
        .map(|_| {
            JsonResponse::build()
                .set_data(RenamedConversation { id, title })
                .ok("Conversation renamed")
        })
        .map_err(|err| JsonResponse::<RenamedConversation>::build().internal_server_error(err))
}
