use actix_web::{http::header, web, FromRequest, HttpRequest};
use chrono::Utc;
use futures_util::future::{ready, Ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config,
    error::ApiError,
    models::{Role, User},
    App,
};

mod password;
pub use password::{hash_password, verify_password};

/// Session token claims: who the caller is and what they may do.
///
/// Carried as a bearer token; there is no ambient session state
/// anywhere else in the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwt {
    /// User id.
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Jwt {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    pub fn issue(user: &User, cfg: &config::Auth) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Self {
            sub: user.id.clone(),
            role: user.role,
            iat: now,
            exp: now + cfg.expiry_secs as i64,
        };

        let key = EncodingKey::from_secret(cfg.secret.as_bytes());
        Ok(jsonwebtoken::encode(
            &Header::new(Self::ALGORITHM),
            &claims,
            &key,
        )?)
    }

    pub fn decode(token: &str, cfg: &config::Auth) -> Result<Self, ApiError> {
        let key = DecodingKey::from_secret(cfg.secret.as_bytes());
        let validation = Validation::new(Self::ALGORITHM);

        jsonwebtoken::decode::<Self>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|error| {
                tracing::debug!(%error, "rejected bearer token");
                ApiError::Unauthorized
            })
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, ApiError> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.strip_prefix("Bearer ").unwrap_or(v))
            .ok_or(ApiError::Unauthorized)?;

        let app = req
            .app_data::<web::Data<App>>()
            .ok_or(ApiError::Unauthorized)?;

        Self::decode(token, &app.config.jwt)
    }
}

impl FromRequest for Jwt {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}

/// Extractor guarding admin-only routes: a valid token whose role
/// claim is `admin`, anything else is a 403.
#[derive(Debug, Clone)]
pub struct AdminJwt(pub Jwt);

impl FromRequest for AdminJwt {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Jwt::from_http_request(req).and_then(|jwt| {
            if jwt.role == Role::Admin {
                Ok(AdminJwt(jwt))
            } else {
                Err(ApiError::Forbidden)
            }
        }))
    }
}
