use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::config::SessionConfig;

/// Payload carried by the session cookie.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: i64, // user id
    pub iat: usize,
    pub exp: usize,
}

/// Signed cookie session. One instance per configuration, owned by the app state.
#[derive(Clone)]
pub struct SessionStore {
    encoding: EncodingKey,
    decoding: DecodingKey,
    cookie_name: String,
    max_age: Duration,
}

impl SessionStore {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            cookie_name: cfg.cookie_name.clone(),
            max_age: cfg.max_age,
        }
    }

    fn sign(&self, user_id: i64) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            sub: user_id,
            iat: now as usize,
            exp: (now + self.max_age.as_secs() as i64) as usize,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Adds a fresh session cookie for `user_id` to the jar.
    pub fn create(&self, jar: CookieJar, user_id: i64) -> anyhow::Result<CookieJar> {
        let token = self.sign(user_id)?;
        let cookie = Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.max_age.as_secs() as i64));
        debug!(user_id, "session created");
        Ok(jar.add(cookie))
    }

    /// Absent, tampered, expired and zero-id sessions all read as `None`.
    pub fn read(&self, jar: &CookieJar) -> Option<i64> {
        let cookie = jar.get(&self.cookie_name)?;
        if cookie.value().is_empty() {
            return None;
        }
        match self.verify(cookie.value()) {
            Ok(claims) if claims.sub != 0 => Some(claims.sub),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "session cookie rejected");
                None
            }
        }
    }

    /// Overwrites the session cookie with an empty, already expired one.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((self.cookie_name.clone(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO);
        jar.add(cookie)
    }
}
