use crate::db;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde::Serialize;
use serde_valid::Validate;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisteredUser {
    id: Uuid,
    uid: String,
    username: String,
    email: String,
    role: String,
}

impl From<&models::User> for RegisteredUser {
    fn from(user: &models::User) -> Self {
        Self {
            id: user.id,
            uid: user.uid.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[tracing::instrument(name = "Register user.", skip(form))]
#[post("/register")]
pub async fn register(
    form: web::Json<forms::auth::RegisterForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        let errors = serde_json::to_value(&errors).unwrap_or_default();
        tracing::debug!("Invalid registration data: {:?}", errors);
        return Err(JsonResponse::<RegisteredUser>::build().form_error(errors));
    }

    let form = form.into_inner();

    conflicting_user(pg_pool.get_ref(), &form).await?;

    let password_hash = helpers::password::hash(&form.password)
        .map_err(|err| JsonResponse::<RegisteredUser>::build().internal_server_error(err))?;

    let user = models::User::new(form.uid, form.username, form.email, password_hash, form.phone);

    db::user::insert(pg_pool.get_ref(), user)
        .await
        .map(|user| {
            JsonResponse::build()
                .set_data(RegisteredUser::from(&user))
                .created("Registration successful")
        })
        .map_err(|err| JsonResponse::<RegisteredUser>::build().internal_server_error(err))
}

async fn conflicting_user(
    pool: &PgPool,
    form: &forms::auth::RegisterForm,
) -> Result<(), actix_web::Error> {
    db::user::fetch_conflicting(pool, &form.email, &form.username, &form.uid)
        .await
        .map_err(|err| JsonResponse::<RegisteredUser>::build().internal_server_error(err))
        .and_then(|existing| match existing {
            Some(user) if user.email == form.email => {
                Err(JsonResponse::<RegisteredUser>::build().conflict("Email already registered"))
            }
            Some(user) if user.username == form.username => {
                Err(JsonResponse::<RegisteredUser>::build().conflict("Username already taken"))
            }
            Some(_) => Err(JsonResponse::<RegisteredUser>::build().conflict("UID already taken")),
            None => Ok(()),
        })
}
