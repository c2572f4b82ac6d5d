use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

const CURRENCY: &str = "INR";

#[derive(Serialize)]
struct BalanceData {
    balance: f64,
    currency: &'static str,
}

#[tracing::instrument(name = "Get balance.")]
#[get("/balance")]
pub async fn balance(
    user: web::ReqData<Arc<models::CurrentUser>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::user::fetch(pg_pool.get_ref(), user.id)
        .await
        .map_err(|err| JsonResponse::<BalanceData>::build().internal_server_error(err))
        .and_then(|account| match account {
            Some(account) => Ok(JsonResponse::build()
                .set_data(BalanceData {
                    balance: account.balance,
                    currency: CURRENCY,
                })
                .ok("Balance retrieved")),
            None => Err(JsonResponse::<BalanceData>::build().not_found("User not found")),
        })
}
