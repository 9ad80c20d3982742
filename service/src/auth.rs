//! Credential handling: password hashes, bearer tokens, register and login.

use std::sync::OnceLock;

use ::entity::user;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveModelTrait, DbConn, Set, SqlErr};
use serde::{Deserialize, Serialize};
use tracing::{field, info, instrument, Span};
use uuid::Uuid;

use crate::{
    form::{LoginForm, RegisterForm},
    view::Session,
    Query, ServiceError,
};

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Payload of an issued token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user the token was issued to.
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Checks signature and expiry and returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        Ok(jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Hash(err.to_string()))
}

/// Constant-time comparison of `plain` against a stored PHC hash.
/// An unparsable hash never verifies.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// Burned on logins for unknown emails so they cost the same as a wrong password.
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| hash_password("decoy-password").unwrap_or_default())
}

pub struct Auth;

impl Auth {
    #[instrument(skip_all, fields(user = field::Empty))]
    pub async fn register(
        db: &DbConn,
        keys: &TokenKeys,
        form: RegisterForm,
    ) -> Result<Session, ServiceError> {
        form.validate()?;
        if Query::find_user_by_email(db, &form.email).await?.is_some() {
            return Err(email_taken());
        }

        let user = user::ActiveModel {
            username: Set(form.username),
            email: Set(form.email),
            password: Set(hash_password(&form.password)?),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|err| match err.sql_err() {
            // lost a race against a concurrent registration
            Some(SqlErr::UniqueConstraintViolation(_)) => email_taken(),
            _ => ServiceError::Db(err),
        })?;

        Span::current().record("user", field::display(user.id));
        info!("user registered");
        session(keys, user)
    }

    #[instrument(skip_all, fields(user = field::Empty))]
    pub async fn login(
        db: &DbConn,
        keys: &TokenKeys,
        form: LoginForm,
    ) -> Result<Session, ServiceError> {
        let Some(user) = Query::find_user_by_email(db, &form.email).await? else {
            verify_password(&form.password, decoy_hash());
            return Err(ServiceError::InvalidCredentials);
        };
        Span::current().record("user", field::display(user.id));
        if !verify_password(&form.password, &user.password) {
            info!("wrong password");
            return Err(ServiceError::InvalidCredentials);
        }
        info!("user logged in");
        session(keys, user)
    }
}

fn email_taken() -> ServiceError {
    ServiceError::Conflict("email is already registered".to_owned())
}

fn session(keys: &TokenKeys, user: user::Model) -> Result<Session, ServiceError> {
    Ok(Session {
        token: keys.issue(user.id)?,
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
    })
}
