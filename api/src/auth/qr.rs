//! Short-lived attendance QR tokens.
//!
//! A QR token is an HS256 JWT signed with the session secret. It names the
//! course, carries the moment the class QR was first shown (used to decide
//! lateness) and expires after `QR_TOKEN_TTL_SECONDS`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use util::config;

pub const QR_TOKEN_KIND: &str = "attendance_qr";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrClaims {
    pub course_id: i64,
    pub kind: String,
    /// Unix seconds.
    pub started_at: i64,
    pub iat: i64,
    pub exp: i64,
}

impl QrClaims {
    pub fn started_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.started_at, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum QrTokenError {
    Invalid,
    Expired,
}

/// Signs a QR token for `course_id` issued at `now`; returns it with its expiry.
pub fn issue_qr_token(
    course_id: i64,
    started_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let expires_at = now + Duration::seconds(config::qr_token_ttl_seconds() as i64);
    let claims = QrClaims {
        course_id,
        kind: QR_TOKEN_KIND.to_owned(),
        started_at: started_at.timestamp(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )?;
    Ok((token, expires_at))
}

/// Verifies signature, kind and expiry of a scanned token.
pub fn verify_qr_token(token: &str) -> Result<QrClaims, QrTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<QrClaims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => QrTokenError::Expired,
        _ => QrTokenError::Invalid,
    })?;

    if data.claims.kind != QR_TOKEN_KIND {
        return Err(QrTokenError::Invalid);
    }
    Ok(data.claims)
}
