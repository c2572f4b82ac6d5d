use actix_web::{get, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};

#[tracing::instrument(name = "Health check.")]
#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
