use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Serialize)]
struct ProjectList {
    projects: Vec<models::Project>,
}

#[tracing::instrument(name = "List projects.")]
#[get("/projects")]
pub async fn list(
    user: web::ReqData<Arc<models::CurrentUser>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::project::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map(|projects| {
            JsonResponse::build()
                .set_data(ProjectList { projects })
                .ok("Projects retrieved")
        })
        .map_err(|err| JsonResponse::<ProjectList>::build().internal_server_error(err))
}
