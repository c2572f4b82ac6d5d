use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
struct ConversationList {
    conversations: Vec<models::Conversation>,
}

#[derive(Serialize)]
struct ConversationDetail {
    conversation: models::Conversation,
    messages: Vec<models::Message>,
}

#[tracing::instrument(name = "List conversations.")]
#[get("/conversations")]
pub async fn list(
    user: web::ReqData<Arc<models::CurrentUser>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::conversation::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map(|conversations| {
            JsonResponse::build()
                .set_data(ConversationList { conversations })
                .ok("Conversations retrieved")
        })
        .map_err(|err| JsonResponse::<ConversationList>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get conversation.")]
#[get("/conversations/{id}")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let conversation = db::conversation::fetch(pg_pool.get_ref(), id, user.id)
        .await
        .map_err(|err| JsonResponse::<ConversationDetail>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<ConversationDetail>::build().not_found("Conversation not found")
        })?;

    db::message::fetch_by_conversation(pg_pool.get_ref(), id)
        .await
        .map(|messages| {
            JsonResponse::build()
                .set_data(ConversationDetail {
                    conversation,
                    messages,
                })
                .ok("Conversation retrieved")
        })
        .map_err(|err| JsonResponse::<ConversationDetail>::build().internal_server_error(err))
}
