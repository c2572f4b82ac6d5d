use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde::Serialize;

/// Response envelope shared by every API endpoint:
/// `{success:true, message, data}` on success (data is null when there is
/// nothing to return), `{success:false, message, errors?}` on failure.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub(crate) success: bool,
    pub(crate) message: String,
    pub(crate) data: Option<T>,
}

pub struct JsonResponseBuilder<T>
where
    T: Serialize,
{
    data: Option<T>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: Serialize,
{
    fn default() -> Self {
        Self { data: None }
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

/// Bare failure envelope, for the few places that answer with an
/// `HttpResponse` directly instead of an actix `Error`.
pub fn error_body(message: impl ToString) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "message": message.to_string(),
    })
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    fn success(self, message: impl ToString) -> JsonResponse<T> {
        JsonResponse {
            success: true,
            message: message.to_string(),
            data: self.data,
        }
    }

    fn failure(
        self,
        status: StatusCode,
        message: impl ToString,
        errors: Option<serde_json::Value>,
    ) -> Error {
        let message = message.to_string();
        let mut body = error_body(&message);
        if let Some(errors) = errors {
            body["errors"] = errors;
        }

        InternalError::from_response(message, HttpResponse::build(status).json(body)).into()
    }

    pub fn ok(self, message: impl ToString) -> HttpResponse {
        HttpResponse::Ok().json(self.success(message))
    }

    pub fn created(self, message: impl ToString) -> HttpResponse {
        HttpResponse::Created().json(self.success(message))
    }

    pub fn bad_request(self, message: impl ToString) -> Error {
        self.failure(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn form_error(self, errors: serde_json::Value) -> Error {
        self.failure(StatusCode::BAD_REQUEST, "Validation failed", Some(errors))
    }

    pub fn unauthorized(self, message: impl ToString) -> Error {
        self.failure(StatusCode::UNAUTHORIZED, message, None)
    }

    pub fn not_found(self, message: impl ToString) -> Error {
        self.failure(StatusCode::NOT_FOUND, message, None)
    }

    pub fn conflict(self, message: impl ToString) -> Error {
        self.failure(StatusCode::CONFLICT, message, None)
    }

    pub fn service_unavailable(self, message: impl ToString) -> Error {
        self.failure(StatusCode::SERVICE_UNAVAILABLE, message, None)
    }

    pub fn internal_server_error(self, message: impl ToString) -> Error {
        let message = message.to_string();
        let message = if message.trim().is_empty() {
            String::from("Internal server error")
        } else {
            message
        };
        self.failure(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }
}
