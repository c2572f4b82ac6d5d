use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Create project.")]
#[post("/projects")]
pub async fn item(
    user: web::ReqData<Arc<models::CurrentUser>>,
    form: web::Json<forms::project::CreateForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let name = form.cleaned_name().ok_or_else(|| {
        JsonResponse::<models::Project>::build().bad_request("Project name is required")
    })?;

    let project = models::Project::new(user.id, name, form.cleaned_icon(), form.cleaned_color());

    db::project::insert(pg_pool.get_ref(), project)
        .await
        .map(|project| {
            JsonResponse::build()
                .set_data(project)
                .created("Project created")
        })
        .map_err(|err| JsonResponse::<models::Project>::build().internal_server_error(err))
}
