use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::session_cookie;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde::Serialize;
use serde_valid::Validate;
use sqlx::PgPool;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoggedInUser {
    uid: String,
    username: String,
    email: String,
    role: String,
    is_first_login: bool,
}

#[tracing::instrument(name = "Login user.", skip(form, settings))]
#[post("/login")]
pub async fn login(
    form: web::Json<forms::auth::LoginForm>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        let errors = serde_json::to_value(&errors).unwrap_or_default();
        return Err(JsonResponse::<LoggedInUser>::build().form_error(errors));
    }

    let user = db::user::fetch_by_email(pg_pool.get_ref(), &form.email)
        .await
        .map_err(|err| JsonResponse::<LoggedInUser>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<LoggedInUser>::build().unauthorized("Invalid email or password")
        })?;

    if !helpers::password::verify(&form.password, &user.password_hash) {
        return Err(JsonResponse::<LoggedInUser>::build().unauthorized("Invalid email or password"));
    }

    if user.is_first_login {
        db::user::clear_first_login(pg_pool.get_ref(), user.id)
            .await
            .map_err(|err| JsonResponse::<LoggedInUser>::build().internal_server_error(err))?;
    }

    let (token, expires_at) = helpers::token::issue(
        &user,
        settings.auth.session_ttl_minutes,
        &settings.auth.secret,
    )
    .map_err(|err| JsonResponse::<LoggedInUser>::build().internal_server_error(err))?;

    db::token::insert(
        pg_pool.get_ref(),
        models::UserToken::new(user.id, token.clone(), expires_at),
    )
    .await
    .map_err(|err| JsonResponse::<LoggedInUser>::build().internal_server_error(err))?;

    let cookie = session_cookie(
        token,
        settings.auth.session_ttl_minutes,
        settings.auth.secure_cookies,
    );

    let mut response = JsonResponse::build()
        .set_data(LoggedInUser {
            uid: user.uid,
            username: user.username,
            email: user.email,
            role: user.role,
            is_first_login: user.is_first_login,
        })
        .ok("Login successful");
    response
        .add_cookie(&cookie)
        .map_err(|err| JsonResponse::<LoggedInUser>::build().internal_server_error(err))?;

    Ok(response)
}
