use crate::configuration::Settings;
use crate::db;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::{removal_cookie, SESSION_COOKIE};
use actix_web::{post, web, HttpRequest, Responder, Result};
use sqlx::PgPool;

/// Idempotent: a missing, expired or unknown cookie still answers 200
/// with the cookie cleared.
#[tracing::instrument(name = "Logout user.", skip(request, settings))]
#[post("/logout")]
pub async fn logout(
    request: HttpRequest,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    if let Some(cookie) = request.cookie(SESSION_COOKIE) {
        let token = cookie.value();
        if let Ok(claims) = helpers::token::verify(token, &settings.auth.secret) {
            db::token::delete(pg_pool.get_ref(), token, claims.user_id)
                .await
                .map_err(|err| {
                    JsonResponse::<serde_json::Value>::build().internal_server_error(err)
                })?;
        }
    }

    let mut response =
        JsonResponse::<serde_json::Value>::build().ok("Logged out successfully");
    response
        .add_cookie(&removal_cookie(settings.auth.secure_cookies))
        .map_err(|err| JsonResponse::<serde_json::Value>::build().internal_server_error(err))?;

    Ok(response)
}
