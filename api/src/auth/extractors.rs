use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use util::config;

use crate::auth::claims::{AuthUser, Claims};

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Decodes and validates a session token.
pub fn decode_session_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Extracts `AuthUser` from a `Bearer` token, or from `?token=` for
/// WebSocket upgrades where browsers cannot set headers.
///
/// Rejects with `401 Unauthorized` when no token is present or it does not verify.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => bearer.token().to_owned(),
            Err(_) => Query::<TokenQuery>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|Query(q)| q.token)
                .filter(|t| !t.is_empty())
                .ok_or((StatusCode::UNAUTHORIZED, "Missing or invalid Authorization header"))?,
        };

        let claims = decode_session_token(&token)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

        Ok(AuthUser(claims))
    }
}
