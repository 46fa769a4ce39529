use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{AppEnv, AuthConfig};
use crate::utils::AppError;

pub const TOKEN_COOKIE: &str = "token";
const TOKEN_TTL_HOURS: i64 = 24;

/// Caller payload plus the registered time claims. `iat`/`exp` are owned by
/// the server and never taken from the payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    payload: Map<String, Value>,
    iat: i64,
    exp: i64,
}

/// Stateless HS256 tokens carried in an HTTP-only cookie.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    secure: bool,
    same_site: SameSite,
}

impl TokenService {
    pub fn new(secret: &str, env: AppEnv) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // payloads are arbitrary; an `aud` key must not make the token unverifiable
        validation.validate_aud = false;

        // development runs front and back end on localhost, which is same-site
        let (secure, same_site) = if env.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Strict)
        };

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            secure,
            same_site,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.secret, config.env)
    }

    /// Signs the payload with a one-day expiry.
    pub fn issue(&self, payload: Map<String, Value>) -> Result<String, AppError> {
        self.sign(payload, Utc::now().timestamp(), Duration::hours(TOKEN_TTL_HOURS))
    }

    fn sign(&self, mut payload: Map<String, Value>, issued_at: i64, ttl: Duration) -> Result<String, AppError> {
        payload.remove("iat");
        payload.remove("exp");

        let claims = Claims {
            payload,
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Returns the original payload of a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.payload)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Session cookie carrying a freshly issued token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish()
    }

    /// Same attributes as the session cookie, emptied and expired.
    /// The token itself stays valid until its `exp`.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}
