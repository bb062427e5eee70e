//! Request authentication.
//!
//! Token verification itself is out of scope for this service; an
//! [`AuthProvider`] turns presented credentials into an [`Identity`], and
//! the shipped implementation resolves bearer tokens against the static
//! table from configuration. Handlers receive the identity through an
//! extractor, so protected routes reject before any body is read.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sideout_types::UserId;

use crate::config::AuthConfig;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// The authenticated caller, as trusted by every handler.
#[derive(Clone, Debug)]
pub struct Identity {
    /// Stable user id; reports created by this caller carry it as owner.
    pub id: UserId,
    /// Email the identity was issued for.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Credentials extracted from a request.
#[derive(Clone, Debug)]
pub enum Credentials {
    /// A bearer token from the `Authorization` header.
    Bearer(String),
    /// No usable credentials were presented.
    Anonymous,
}

/// Resolves credentials to an identity, or rejects the request.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

/// Auth provider backed by the static token table from configuration.
pub struct StaticTokenAuth {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenAuth {
    /// Build from explicit token-to-identity pairs.
    pub fn new(tokens: impl IntoIterator<Item = (String, Identity)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Build from the `[auth]` section of the configuration.
    pub fn from_config(config: &AuthConfig) -> ServerResult<Self> {
        let mut tokens = HashMap::with_capacity(config.tokens.len());
        for entry in &config.tokens {
            let id = UserId::new(entry.id.as_str())
                .map_err(|e| ServerError::Config(format!("auth token for {:?}: {e}", entry.email)))?;
            tokens.insert(
                entry.token.clone(),
                Identity {
                    id,
                    email: entry.email.clone(),
                    name: entry.name.clone(),
                },
            );
        }
        Ok(Self { tokens })
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => self
                .tokens
                .get(token)
                .cloned()
                .ok_or_else(|| ServerError::Unauthorized("Invalid token".to_string())),
            Credentials::Anonymous => Err(ServerError::auth_required()),
        }
    }
}

/// Pull credentials out of the `Authorization` header.
///
/// Anything other than a non-empty `Bearer <token>` value counts as
/// anonymous.
fn extract_credentials(parts: &Parts) -> Credentials {
    let Some(value) = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    else {
        return Credentials::Anonymous;
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return Credentials::Anonymous;
    };
    let token = token.trim();
    if token.is_empty() {
        Credentials::Anonymous
    } else {
        Credentials::Bearer(token.to_string())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credentials = extract_credentials(parts);
        state.auth.authenticate(&credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticToken;

    fn provider() -> StaticTokenAuth {
        StaticTokenAuth::from_config(&AuthConfig {
            tokens: vec![StaticToken {
                token: "good-token".to_string(),
                id: "u-1".to_string(),
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
            }],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn known_token_authenticates() {
        let identity = provider()
            .authenticate(&Credentials::Bearer("good-token".to_string()))
            .await
            .unwrap();
        assert_eq!(identity.id.as_str(), "u-1");
        assert_eq!(identity.email, "ana@example.com");
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let err = provider()
            .authenticate(&Credentials::Bearer("bad-token".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn anonymous_is_rejected() {
        let err = provider()
            .authenticate(&Credentials::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Unauthorized(_)));
    }

    #[test]
    fn blank_token_id_fails_config() {
        let result = StaticTokenAuth::from_config(&AuthConfig {
            tokens: vec![StaticToken {
                token: "t".to_string(),
                id: "   ".to_string(),
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
            }],
        });
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn header_parsing_falls_back_to_anonymous() {
        let cases = [
            None,
            Some("Basic dXNlcjpwYXNz"),
            Some("Bearer "),
            Some("Bearer    "),
            Some("bearer lowercase-scheme"),
        ];
        for case in cases {
            let mut builder = axum::http::Request::builder().uri("/");
            if let Some(value) = case {
                builder = builder.header(AUTHORIZATION, value);
            }
            let (parts, ()) = builder.body(()).unwrap().into_parts();
            assert!(
                matches!(extract_credentials(&parts), Credentials::Anonymous),
                "case {case:?} should be anonymous"
            );
        }
    }

    #[test]
    fn bearer_token_is_extracted_and_trimmed() {
        let (parts, ()) = axum::http::Request::builder()
            .uri("/")
            .header(AUTHORIZATION, "Bearer  token-123 ")
            .body(())
            .unwrap()
            .into_parts();
        match extract_credentials(&parts) {
            Credentials::Bearer(token) => assert_eq!(token, "token-123"),
            other => panic!("expected bearer, got {other:?}"),
        }
    }
}
