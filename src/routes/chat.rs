use crate::configuration::Settings;
use crate::connectors::PromptlyConnector;
use crate::db;
use crate::helpers::sanitizer;
use crate::helpers::uploads::{self, StoredUpload, UploadError};
use crate::helpers::JsonResponse;
use crate::models;
use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{post, web, Responder, Result};
use futures::TryStreamExt;
use serde::Serialize;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatOutcome {
    conversation_id: Uuid,
    response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<Option<Uuid>>,
}

#[derive(Default)]
struct ChatPayload {
    message: Option<String>,
    conversation_id: Option<Uuid>,
    project_id: Option<Uuid>,
    upload: Option<StoredUpload>,
}

#[tracing::instrument(name = "Chat turn.", skip_all)]
#[post("/chat")]
pub async fn send(
    user: web::ReqData<Arc<models::CurrentUser>>,
    payload: Multipart,
    pg_pool: web::Data<PgPool>,
    promptly: web::Data<Arc<dyn PromptlyConnector>>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let fields = collect_payload(payload, settings.get_ref()).await?;

    let message = match fields.message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(JsonResponse::<ChatOutcome>::build().bad_request("Message is required")),
    };

    let message = sanitizer::sanitize_message(&message);
    if message.is_empty() {
        return Err(JsonResponse::<ChatOutcome>::build()
            .bad_request("Message cannot be empty after sanitization"));
    }

    let mut created: Option<models::Conversation> = None;
    let conversation_id = match fields.conversation_id {
        Some(id) => {
            db::conversation::fetch(pg_pool.get_ref(), id, user.id)
                .await
                .map_err(|err| JsonResponse::<ChatOutcome>::build().internal_server_error(err))?
                .ok_or_else(|| {
                    JsonResponse::<ChatOutcome>::build().not_found("Conversation not found")
                })?
                .id
        }
        None => {
            // A project the caller does not own is dropped, not rejected.
            let project_id = match fields.project_id {
                Some(project_id) => {
                    db::project::fetch(pg_pool.get_ref(), project_id, user.id)
                        .await
                        .map_err(|err| {
                            JsonResponse::<ChatOutcome>::build().internal_server_error(err)
                        })?
                        .map(|project| project.id)
                }
                None => None,
            };

            let title = sanitizer::conversation_title(&message);
            let conversation = db::conversation::insert(
                pg_pool.get_ref(),
                models::Conversation::new(user.id, title, project_id),
            )
            .await
            .map_err(|err| JsonResponse::<ChatOutcome>::build().internal_server_error(err))?;

            let id = conversation.id;
            created = Some(conversation);
            id
        }
    };

    let (file_url, prompt) = match &fields.upload {
        Some(upload) => (
            Some(upload.url.clone()),
            format!(
                "{} [User also attached a file: {}]",
                message, upload.original_name
            ),
        ),
        None => (None, message.clone()),
    };

    let reply = promptly.chat(&prompt).await.map_err(|err| {
        tracing::error!("AI gateway call failed: {}", err);
        JsonResponse::<ChatOutcome>::build()
            .service_unavailable("AI service temporarily unavailable.")
    })?;

    db::message::insert(
        pg_pool.get_ref(),
        models::Message::new(conversation_id, models::MessageRole::User, message, file_url),
    )
    .await
    .map_err(|err| JsonResponse::<ChatOutcome>::build().internal_server_error(err))?;

    db::message::insert(
        pg_pool.get_ref(),
        models::Message::new(
            conversation_id,
            models::MessageRole::Assistant,
            reply.clone(),
            None,
        ),
    )
    .await
    .map_err(|err| JsonResponse::<ChatOutcome>::build().internal_server_error(err))?;

    db::conversation::touch(pg_pool.get_ref(), conversation_id)
        .await
        .map_err(|err| JsonResponse::<ChatOutcome>::build().internal_server_error(err))?;

    let outcome = match created {
        Some(conversation) => ChatOutcome {
            conversation_id,
            response: reply,
            title: Some(conversation.title),
            project_id: Some(conversation.project_id),
        },
        None => ChatOutcome {
            conversation_id,
            response: reply,
            title: None,
            project_id: None,
        },
    };

    Ok(JsonResponse::build()
        .set_data(outcome)
        .ok("Chat response generated"))
}

async fn collect_payload(
    mut payload: Multipart,
    settings: &Settings,
) -> Result<ChatPayload, actix_web::Error> {
    let mut fields = ChatPayload::default();

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let name = field.name().to_string();
        match name.as_str() {
            "message" => fields.message = Some(read_text(&mut field).await.map_err(bad_multipart)?),
            "conversationId" => {
                let value = read_text(&mut field).await.map_err(bad_multipart)?;
                fields.conversation_id = value.trim().parse::<Uuid>().ok();
            }
            "projectId" => {
                let value = read_text(&mut field).await.map_err(bad_multipart)?;
                fields.project_id = value.trim().parse::<Uuid>().ok();
            }
            "file" => {
                let stored = uploads::persist_field(
                    &mut field,
                    Path::new(&settings.uploads.directory),
                    settings.uploads.max_file_bytes,
                )
                .await
                .map_err(|err| match err {
                    UploadError::TooLarge(_) => {
                        JsonResponse::<ChatOutcome>::build().bad_request(err.to_string())
                    }
                    other => {
                        tracing::error!("Failed to store upload: {}", other);
                        JsonResponse::<ChatOutcome>::build().internal_server_error(other)
                    }
                })?;
                fields.upload = Some(stored);
            }
            _ => {
                // Unknown fields are drained so the stream can move on.
                while field.try_next().await.map_err(bad_multipart)?.is_some() {}
            }
        }
    }

    Ok(fields)
}

async fn read_text(field: &mut Field) -> Result<String, MultipartError> {
    let mut buffer = web::BytesMut::new();
    while let Some(chunk) = field.try_next().await? {
        buffer.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn bad_multipart(err: MultipartError) -> actix_web::Error {
    JsonResponse::<ChatOutcome>::build().bad_request(format!("Invalid multipart payload: {}", err))
}
