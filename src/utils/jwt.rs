use crate::{config::jwt::JWTConfig, entity::user::Role, error::AppError, ServiceState};
use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Utc;
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, TokenData, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use uuid::Uuid;

pub static DECODE_HEADER: Lazy<Validation> = Lazy::new(Validation::default);
pub static ENCODE_HEADER: Lazy<Header> = Lazy::new(Header::default);

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct UserClaims {
    pub iat: i64,
    pub exp: i64,
    pub uid: Uuid,
    pub role: Role,
}

impl UserClaims {
    pub fn new(duration: Duration, user_id: Uuid, role: Role) -> Self {
        let now = Utc::now().timestamp();
        Self {
            iat: now,
            exp: now + duration.as_secs() as i64,
            uid: user_id,
            role,
        }
    }

    pub fn decode(token: &str, key: &str) -> Result<TokenData<Self>, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(key.as_ref()),
            &DECODE_HEADER,
        )
    }

    pub fn encode(&self, key: &str) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &ENCODE_HEADER,
            self,
            &EncodingKey::from_secret(key.as_ref()),
        )
    }
}

pub fn generate_token_pair(
    config: &JWTConfig,
    user_id: Uuid,
    role: Role,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let access_token = UserClaims::new(
        Duration::from_secs(config.access_token_expired_date),
        user_id,
        role,
    )
    .encode(&config.access_token_secret)?;

    let refresh_token = UserClaims::new(
        Duration::from_secs(config.refresh_token_expired_date),
        user_id,
        role,
    )
    .encode(&config.refresh_token_secret)?;

    Ok((access_token, refresh_token))
}

/// Maps a decode failure to the message shown to the client.
pub fn token_error(err: &jsonwebtoken::errors::Error) -> AppError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("token has expired"),
        _ => AppError::unauthorized("invalid token"),
    }
}

#[async_trait::async_trait]
impl FromRequestParts<Arc<ServiceState>> for UserClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServiceState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthorized("please log in first"))?;

        let user_claims = UserClaims::decode(bearer.token(), &state.config.jwt.access_token_secret)
            .map_err(|e| token_error(&e))?
            .claims;

        Ok(user_claims)
    }
}
