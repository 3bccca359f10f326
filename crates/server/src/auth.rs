//! Bearer token authentication and role gating.
//!
//! Tokens are HS256 JWTs carrying `{sub, role, exp}`. Gated routes are
//! wrapped with [`require_role`], which rejects a missing or invalid token
//! with 401 and a token whose role is too weak with 403. On success the
//! decoded [`Claims`] are placed in the request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use domain::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Authorization header must use the Bearer scheme")]
    MalformedHeader,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("Role {actual} is not allowed here, {required} required")]
    InsufficientRole { required: Role, actual: Role },
}

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (caller name)
    pub sub: String,
    pub role: Role,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, role: Role, ttl: Duration) -> Self {
        Self {
            sub: sub.into(),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}

/// Signing and verification keys derived from the shared secret
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

/// Middleware state for a route that requires `role`
#[derive(Debug, Clone)]
pub struct RoleGuard {
    keys: Arc<JwtKeys>,
    role: Role,
}

impl RoleGuard {
    pub fn new(keys: Arc<JwtKeys>, role: Role) -> Self {
        Self { keys, role }
    }

    /// Decode the bearer token in `headers` and check its role.
    /// The scheme name is matched case-insensitively.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.trim_start().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedHeader)?;

        let claims = self.keys.verify(token)?;
        if !claims.role.satisfies(self.role) {
            return Err(AuthError::InsufficientRole {
                required: self.role,
                actual: claims.role,
            });
        }

        Ok(claims)
    }
}

pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = guard.authorize(request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
