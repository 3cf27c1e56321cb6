//! Access token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying the user's id, email and roles. The
//! signing secret is read once into [`Config`] and handed to the service;
//! when it is missing every operation fails with a configuration error
//! rather than an authentication error.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, ACCESS_TOKEN_VALIDITY_DAYS, SECONDS_PER_DAY, TOKEN_TYPE_BEARER};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub id: Uuid,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = json!(["user"]))]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 1296000)]
    pub expires_in: i64,
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and validates access tokens. Cheap to clone.
#[derive(Clone)]
pub struct TokenService {
    keys: Option<SigningKeys>,
    validity: Duration,
}

impl TokenService {
    /// Build from a raw secret. `None` yields a service whose operations
    /// all report a configuration error.
    pub fn new(secret: Option<&[u8]>) -> Self {
        let keys = secret.map(|secret| SigningKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        });

        Self {
            keys,
            validity: Duration::days(ACCESS_TOKEN_VALIDITY_DAYS),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret_bytes())
    }

    fn keys(&self) -> AppResult<&SigningKeys> {
        self.keys
            .as_ref()
            .ok_or_else(|| AppError::configuration("SECRET_ACCESS_TOKEN_KEY is not set"))
    }

    /// Sign a token for the user.
    pub fn issue(&self, user: &User) -> AppResult<TokenResponse> {
        let keys = self.keys()?;

        let now = Utc::now();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: ACCESS_TOKEN_VALIDITY_DAYS * SECONDS_PER_DAY,
        })
    }

    /// Check signature and expiry and return the claims.
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let keys = self.keys()?;

        decode::<Claims>(token, &keys.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected access token: {}", e);
                AppError::InvalidToken
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("configured", &self.keys.is_some())
            .field("validity", &self.validity)
            .finish()
    }
}
