//! JWT session tokens (HS256)

use crate::contract::{Role, Session};
use crate::domain::session::SessionResolver;
use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    email: String,
    #[serde(default)]
    role: Option<String>,
    exp: i64,
}

/// Verifies session tokens signed with the shared session secret
pub struct JwtSessionResolver {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl JwtSessionResolver {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Sign a token for `session` valid for `ttl`
    pub fn issue(&self, session: &Session, ttl: chrono::Duration) -> Result<String> {
        let claims = Claims {
            sub: session.user_id,
            email: session.email.clone(),
            role: Some(session.role.as_str().to_string()),
            exp: (chrono::Utc::now() + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign session token")
    }
}

impl SessionResolver for JwtSessionResolver {
    fn resolve(&self, token: &str) -> Option<Session> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(Session {
                user_id: data.claims.sub,
                email: data.claims.email,
                role: data
                    .claims
                    .role
                    .as_deref()
                    .map(Role::parse)
                    .unwrap_or(Role::User),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                None
            }
        }
    }
}
