//! # Sheets Credentials
//!
//! Service account authorization using the OAuth2 JWT bearer grant, or a
//! plain API key for read-only access.
//!
//! ## Invariants
//! - Assertions are signed RS256 with the service account's private key
//! - A cached access token is reused until one minute before it expires
//! - API key credentials never authorize a mutation

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::errors::{TableError, TableResult};

/// OAuth scope granting read/write access to spreadsheets
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Default OAuth token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime accepted by the token endpoint
const ASSERTION_TTL_SECS: i64 = 3600;

/// Margin before expiry at which a cached token is refreshed
const REFRESH_MARGIN_SECS: i64 = 60;

/// Service account key file contents (the fields used here)
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text
    pub fn from_json(json: &str) -> TableResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TableError::Auth(format!("invalid service account JSON: {}", e)))
    }

    /// Parse a key from base64-encoded JSON
    pub fn from_base64(encoded: &str) -> TableResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| TableError::Auth(format!("invalid base64 service account: {}", e)))?;
        let json = String::from_utf8(bytes)
            .map_err(|_| TableError::Auth("service account is not UTF-8".to_string()))?;
        Self::from_json(&json)
    }
}

/// Claims of the signed assertion sent to the token endpoint
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_TTL_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Exchanges service account assertions for access tokens
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, client: reqwest::Client) -> TableResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| TableError::Auth(format!("invalid private key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            client,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Signed assertion for the token endpoint
    fn assertion(&self, now: DateTime<Utc>) -> TableResult<String> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| TableError::Auth(format!("failed to sign assertion: {}", e)))
    }

    /// Current access token, fetching a new one when needed
    pub async fn access_token(&self) -> TableResult<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let assertion = self.assertion(now)?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| TableError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TableError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TableError::Auth(format!("malformed token response: {}", e)))?;

        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "obtained sheets access token"
        );

        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });
        Ok(value)
    }
}

/// How requests to the Sheets API are authorized
pub enum Credentials {
    /// Service account with read/write access
    ServiceAccount(ServiceAccountAuth),
    /// API key, read-only
    ApiKey(String),
}

impl Credentials {
    pub fn can_write(&self) -> bool {
        matches!(self, Credentials::ServiceAccount(_))
    }

    /// Attach credentials to a request; `operation` names a mutation, or is
    /// `None` for reads.
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        operation: Option<&'static str>,
    ) -> TableResult<reqwest::RequestBuilder> {
        match self {
            Credentials::ServiceAccount(auth) => {
                let token = auth.access_token().await?;
                Ok(request.bearer_auth(token))
            }
            Credentials::ApiKey(key) => match operation {
                Some(op) => Err(TableError::ReadOnly(op)),
                None => Ok(request.query(&[("key", key.as_str())])),
            },
        }
    }
}
