use std::sync::Arc;

use crate::{error::AppError, ServiceState};
use axum::extract::State;
use axum::{body, extract::Request, middleware::Next, response::IntoResponse};
use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;
type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "X-Signature";
/// Largest admin body buffered for signature checking.
pub const MAX_SIGNED_BODY: usize = 64 * 1024;

/// Base64 HMAC-SHA256 of `body`, the value admin callers put in `X-Signature`.
pub fn sign_body(key: &str, body: &[u8]) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|_| AppError::Internal("invalid admin signature key".to_string()))?;
    mac.update(body);
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Guards the admin surface (catalog mutation, coach promotion). The body is
/// buffered, checked against the signature, then handed on unchanged.
pub async fn verify_signature(
    State(state): State<Arc<ServiceState>>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let (parts, body) = req.into_parts();
    let signature = parts.headers.get(SIGNATURE_HEADER).ok_or_else(|| {
        warn!("admin request without {} header", SIGNATURE_HEADER);
        AppError::unauthorized("missing request signature")
    })?;
    let signature_str = signature
        .to_str()
        .map_err(|_| AppError::unauthorized("malformed request signature"))?;

    let signature_bytes = BASE64_STANDARD
        .decode(signature_str)
        .map_err(|_| AppError::unauthorized("malformed request signature"))?;

    let whole_body = body::to_bytes(body, MAX_SIGNED_BODY)
        .await
        .map_err(|_| {
            warn!("admin request body on {} over {} bytes", parts.uri, MAX_SIGNED_BODY);
            AppError::validation("request body too large")
        })?;

    let mut mac = HmacSha256::new_from_slice(state.config.secret.admin_signature_key.as_bytes())
        .map_err(|_| AppError::Internal("invalid admin signature key".to_string()))?;
    mac.update(&whole_body);

    mac.verify_slice(&signature_bytes).map_err(|_| {
        warn!("admin request signature mismatch on {}", parts.uri);
        AppError::unauthorized("invalid request signature")
    })?;

    Ok(next
        .run(Request::from_parts(parts, whole_body.into()))
        .await)
}
