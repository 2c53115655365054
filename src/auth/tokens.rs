use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::JWTConfig;

/// Verification failure. Expired, malformed and wrongly-signed tokens are
/// deliberately indistinguishable to callers.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidToken;

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed, time-bounded session tokens.
///
/// Tokens are HS256 JWTs carrying the user id as the subject claim.
/// Verification is stateless: there is no revocation list, only the
/// expiry embedded at issuance.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    iss: String,
    exp: i64,
}

impl TokenService {
    pub fn new(config: &JWTConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.iss]);

        TokenService {
            encoding_key: EncodingKey::from_secret(config.secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.secret.as_ref()),
            validation,
            iss: config.iss.clone(),
            exp: config.exp,
        }
    }

    /// Produce a signed token for the given user id, expiring `exp`
    /// seconds from now.
    pub fn issue(&self, user_id: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.iss.clone(),
            iat: now,
            exp: now + self.exp,
        };
        encode(&Header::default(), &claims, &self.encoding_key).expect("Failed to encode JWT")
    }

    /// Check signature, expiry and issuer, returning the embedded user id.
    /// All failure modes collapse into [`InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<i64, InvalidToken> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("Token verification failed: {}", e);
            InvalidToken
        })?;
        data.claims.sub.parse::<i64>().map_err(|_| InvalidToken)
    }
}
