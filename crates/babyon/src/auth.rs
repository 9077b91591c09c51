//! Bearer-token identity for API callers.
//!
//! Tokens are HS256 JWTs issued by the account service. This module only verifies them and
//! exposes the caller as axum extractors; the verifier is installed as an `Extension`.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::error_response;
use crate::sitters::domain::SitterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Sitter,
    Parent,
    Admin,
}

impl UserRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sitter" => Some(Self::Sitter),
            "parent" => Some(Self::Parent),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or malformed Authorization header")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("token subject is not a numeric user id")]
    InvalidSubject,
    #[error("token verifier is not configured")]
    NotConfigured,
    #[error("{0}")]
    Forbidden(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) | AuthError::InvalidSubject => {
                warn!(error = %self, "rejected bearer token");
                error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid or missing token")
            }
            AuthError::Forbidden(message) => {
                error_response(StatusCode::FORBIDDEN, "UNAUTHORIZED_ACCESS", message)
            }
            AuthError::NotConfigured => crate::error::internal_error_response(),
        }
    }
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(
        &self,
        user_id: u64,
        email: &str,
        role: UserRole,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Any caller presenting a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub email: String,
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let verifier = parts
            .extensions
            .get::<Arc<JwtVerifier>>()
            .cloned()
            .ok_or(AuthError::NotConfigured)?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = verifier.verify(token)?;
        let user_id = claims
            .sub
            .parse::<u64>()
            .map_err(|_| AuthError::InvalidSubject)?;

        Ok(Self {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Caller holding the sitter role; the token subject is the sitter id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSitter(pub SitterId);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedSitter
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Sitter {
            warn!(user_id = user.user_id, role = ?user.role, "non-sitter attempted sitter-only route");
            return Err(AuthError::Forbidden(
                "Only sitters can access this resource".to_string(),
            ));
        }
        Ok(Self(SitterId(user.user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_round_trip_through_verify() {
        let verifier = JwtVerifier::new("unit-test-secret");
        let token = verifier
            .issue(42, "sitter@babyon.kr", UserRole::Sitter, Duration::minutes(5))
            .expect("token issued");
        let claims = verifier.verify(&token).expect("token verifies");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, UserRole::Sitter);
    }

    #[test]
    fn tokens_signed_with_other_secret_are_rejected() {
        let token = JwtVerifier::new("first")
            .issue(1, "a@b.c", UserRole::Parent, Duration::minutes(5))
            .expect("token issued");
        assert!(matches!(
            JwtVerifier::new("second").verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let verifier = JwtVerifier::new("unit-test-secret");
        let token = verifier
            .issue(7, "late@babyon.kr", UserRole::Sitter, Duration::hours(-2))
            .expect("token issued");
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(UserRole::parse("SITTER"), Some(UserRole::Sitter));
        assert_eq!(UserRole::parse(" parent "), Some(UserRole::Parent));
        assert_eq!(UserRole::parse("guest"), None);
    }
}
