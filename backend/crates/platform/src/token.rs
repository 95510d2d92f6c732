//! JWT Token Issuance and Validation
//!
//! HS256 access/refresh token pairs for stateless session handling.
//! Access tokens carry the account id, email, and verification status so
//! request handlers can authorize without a database round trip.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Token issuance/validation errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Signature invalid, token expired, or claims malformed
    #[error("Invalid or expired token")]
    Invalid,

    /// A refresh token was presented where an access token is required
    #[error("Wrong token type")]
    WrongTokenType,
}

/// Configuration for token issuance
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    /// Token issuer (iss claim)
    pub issuer: String,
    /// Access token expiry (default: 1 day)
    pub access_token_ttl: Duration,
    /// Refresh token expiry (default: 7 days)
    pub refresh_token_ttl: Duration,
}

impl TokenConfig {
    /// Create config with an HS256 symmetric key
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into().into_bytes(),
            issuer: issuer.into(),
            access_token_ttl: Duration::from_secs(24 * 60 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }

    /// Set access token TTL
    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Set refresh token TTL
    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }
}

/// Token type for distinguishing access vs refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived, used for API access
    Access,
    /// Long-lived, exchanged for new access tokens
    Refresh,
}

/// Claims carried by both access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Whether the account's email address is verified
    pub verified: bool,
    /// Token type
    pub token_type: TokenType,
    /// JWT ID (unique per token)
    pub jti: String,
    /// Issued at (unix timestamp)
    pub iat: u64,
    /// Expiration time (unix timestamp)
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

/// Issued token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,
    /// Refresh token (long-lived)
    pub refresh_token: String,
    /// Access token expiry in seconds
    pub expires_in: u64,
    /// Token type (always "Bearer")
    pub token_type: &'static str,
}

/// Account info needed for token issuance
#[derive(Debug, Clone)]
pub struct TokenSubject<'a> {
    /// Account ID (becomes sub claim)
    pub account_id: &'a str,
    /// Account email
    pub email: &'a str,
    /// Email verification status
    pub verified: bool,
}

/// Issues and validates JWT tokens
#[derive(Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    /// Create a new issuer with the given configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.secret);
        let decoding_key = DecodingKey::from_secret(&config.secret);
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token pair (access + refresh) for an account
    pub fn issue(&self, subject: TokenSubject<'_>) -> Result<TokenPair, TokenError> {
        let now = current_timestamp();

        let access_claims = self.build_claims(
            &subject,
            TokenType::Access,
            now,
            self.config.access_token_ttl,
        );
        let refresh_claims = self.build_claims(
            &subject,
            TokenType::Refresh,
            now,
            self.config.refresh_token_ttl,
        );

        let header = Header::new(Algorithm::HS256);

        let access_token = encode(&header, &access_claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
        let refresh_token = encode(&header, &refresh_claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_ttl.as_secs(),
            token_type: "Bearer",
        })
    }

    /// Decode and validate an access token
    ///
    /// Rejects expired tokens, bad signatures, wrong issuers, and refresh
    /// tokens presented as access tokens.
    pub fn decode_access(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.token_type != TokenType::Access {
            return Err(TokenError::WrongTokenType);
        }

        Ok(data.claims)
    }

    /// Decode and validate a refresh token
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.token_type != TokenType::Refresh {
            return Err(TokenError::WrongTokenType);
        }

        Ok(data.claims)
    }

    fn build_claims(
        &self,
        subject: &TokenSubject<'_>,
        token_type: TokenType,
        now: u64,
        ttl: Duration,
    ) -> Claims {
        Claims {
            sub: subject.account_id.to_string(),
            email: subject.email.to_string(),
            verified: subject.verified,
            token_type,
            jti: generate_jti(),
            iat: now,
            exp: now + ttl.as_secs(),
            iss: self.config.issuer.clone(),
        }
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn generate_jti() -> String {
    URL_SAFE_NO_PAD.encode(crate::crypto::random_bytes(16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new(
            "test-secret-key-32-bytes-long!!!",
            "marketplace-test",
        ))
    }

    fn test_subject() -> TokenSubject<'static> {
        TokenSubject {
            account_id: "a3f1c2d4-0000-0000-0000-000000000001",
            email: "seller@example.com",
            verified: true,
        }
    }

    #[test]
    fn test_issue_token_pair() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 24 * 60 * 60);
    }

    #[test]
    fn test_decode_access_claims() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        let claims = issuer.decode_access(&pair.access_token).unwrap();
        assert_eq!(claims.sub, "a3f1c2d4-0000-0000-0000-000000000001");
        assert_eq!(claims.email, "seller@example.com");
        assert!(claims.verified);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.iss, "marketplace-test");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        let result = issuer.decode_access(&pair.refresh_token);
        assert!(matches!(result, Err(TokenError::WrongTokenType)));
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        let result = issuer.decode_refresh(&pair.access_token);
        assert!(matches!(result, Err(TokenError::WrongTokenType)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        let other = TokenIssuer::new(TokenConfig::new(
            "a-completely-different-secret!!!",
            "marketplace-test",
        ));
        assert!(matches!(
            other.decode_access(&pair.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        let other = TokenIssuer::new(TokenConfig::new(
            "test-secret-key-32-bytes-long!!!",
            "some-other-app",
        ));
        assert!(matches!(
            other.decode_access(&pair.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_unique_jti_per_token() {
        let issuer = test_issuer();
        let pair = issuer.issue(test_subject()).unwrap();

        let access = issuer.decode_access(&pair.access_token).unwrap();
        let refresh = issuer.decode_refresh(&pair.refresh_token).unwrap();
        assert_ne!(access.jti, refresh.jti);
    }
}
