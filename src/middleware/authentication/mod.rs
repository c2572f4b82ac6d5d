mod manager;
mod manager_middleware;

pub use manager::*;
pub use manager_middleware::*;

use crate::configuration::Settings;
use crate::db;
use crate::helpers::{self, JsonResponse};
use crate::models;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{dev::ServiceRequest, web, Error, HttpMessage};
use sqlx::PgPool;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "kodbank_token";

/// Session cookie set at login. HttpOnly and same-site strict so the
/// token never leaks to scripts or cross-site requests.
pub fn session_cookie(token: String, ttl_minutes: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::minutes(ttl_minutes))
        .finish()
}

/// Expired twin of the session cookie, sent at logout to clear it.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}

/// Validate the session cookie. The token signature must check out AND a
/// live session row must still exist for it; either alone is not enough.
async fn authenticate_request(req: &ServiceRequest) -> Result<(), Error> {
    let token = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            return Err(JsonResponse::<models::CurrentUser>::build()
                .unauthorized("Authentication required"))
        }
    };

    let settings = req.app_data::<web::Data<Settings>>().ok_or_else(|| {
        JsonResponse::<models::CurrentUser>::build()
            .internal_server_error("Settings not configured")
    })?;

    let claims = match helpers::token::verify(&token, &settings.auth.secret) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("Rejected session token: {}", err);
            return Err(JsonResponse::<models::CurrentUser>::build().unauthorized("Invalid token"));
        }
    };

    let pg_pool = req.app_data::<web::Data<PgPool>>().ok_or_else(|| {
        JsonResponse::<models::CurrentUser>::build()
            .internal_server_error("Database not configured")
    })?;

    let session = db::token::fetch_active(pg_pool.get_ref(), &token, claims.user_id)
        .await
        .map_err(|err| JsonResponse::<models::CurrentUser>::build().internal_server_error(err))?;

    if session.is_none() {
        return Err(JsonResponse::<models::CurrentUser>::build()
            .unauthorized("Invalid or expired session"));
    }

    let user = helpers::token::user_from_claims(&claims);
    req.extensions_mut().insert(Arc::new(user));

    Ok(())
}
