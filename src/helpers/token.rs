use crate::models;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Claims carried by the session token (HS256 JWT).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub uid: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
}

/// Sign a session token for the user. Returns the token together with
/// its expiry, which the caller persists alongside the session row.
pub fn issue(
    user: &models::User,
    ttl_minutes: i64,
    secret: &str,
) -> Result<(String, DateTime<Utc>), String> {
    let expires_at = Utc::now() + Duration::minutes(ttl_minutes);
    let claims = Claims {
        uid: user.uid.clone(),
        user_id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: expires_at.timestamp(),
    };

    let header = serde_json::json!({"alg": "HS256", "typ": "JWT"});
    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload = serde_json::to_string(&claims)
        .map_err(|err| format!("Failed to encode JWT claims: {}", err))?;
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload);

    let signing_input = format!("{}.{}", header_b64, payload_b64);
    let mut mac = hmac_for(secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok((format!("{}.{}", signing_input, signature), expires_at))
}

/// Parse and validate a session token: signature first, expiry second.
pub fn verify(token: &str, secret: &str) -> Result<Claims, String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid JWT format: expected 3 parts (header.payload.signature)".to_string());
    }

    let signature = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|err| format!("Failed to decode JWT signature: {}", err))?;

    let mut mac = hmac_for(secret)?;
    mac.update(format!("{}.{}", parts[0], parts[1]).as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| "JWT signature mismatch".to_string())?;

    let decoded = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|err| format!("Failed to decode JWT payload: {}", err))?;
    let claims: Claims = serde_json::from_slice(&decoded)
        .map_err(|err| format!("Failed to parse JWT claims: {}", err))?;

    let now = Utc::now().timestamp();
    if claims.exp < now {
        return Err(format!(
            "JWT token expired (exp: {}, now: {})",
            claims.exp, now
        ));
    }

    Ok(claims)
}

/// Create the request-scoped identity from validated claims.
pub fn user_from_claims(claims: &Claims) -> models::CurrentUser {
    models::CurrentUser {
        id: claims.user_id,
        uid: claims.uid.clone(),
        username: claims.username.clone(),
        email: claims.email.clone(),
        role: claims.role.clone(),
    }
}

fn hmac_for(secret: &str) -> Result<HmacSha256, String> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| format!("Failed to initialize HMAC: {}", err))
}
