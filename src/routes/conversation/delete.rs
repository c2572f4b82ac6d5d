use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
struct DeletedConversation {
    id: Uuid,
}

/// Removing a conversation takes its messages with it through the FK
/// cascade.
#[tracing::instrument(name = "Delete conversation.")]
#[delete("/conversations/{id}")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::conversation::delete(pg_pool.get_ref(), id, user.id)
        .await
        .map_err(|err| JsonResponse::<DeletedConversation>::build().internal_server_error(err))
        .and_then(|deleted| match deleted {
            true => Ok(JsonResponse::build()
                .set_data(DeletedConversation { id })
                .ok("Conversation deleted")),
            false => Err(JsonResponse::<DeletedConversation>::build()
                .not_found("Conversation not found")),
        })
}
