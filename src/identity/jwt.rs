use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::{IdentityError, IdentityProvider, Session, User};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &User, expiry_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

struct UserRecord {
    user: User,
    password_hash: String,
}

/// Self-contained identity provider: in-memory user registry, stateless
/// HS256 bearer tokens. Sufficient for an internal hub; deployments that
/// outgrow it swap in another [`IdentityProvider`] implementation.
pub struct JwtIdentityProvider {
    secret: String,
    expiry_hours: u64,
    users: RwLock<HashMap<String, UserRecord>>,
}

impl JwtIdentityProvider {
    pub fn new(secret: impl Into<String>, expiry_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiry_hours,
            users: RwLock::new(HashMap::new()),
        }
    }

    fn hash_password(password: &str) -> String {
        format!("{:x}", Sha256::digest(password.as_bytes()))
    }

    fn issue_session(&self, user: &User) -> Result<Session, IdentityError> {
        if self.secret.is_empty() {
            return Err(IdentityError::Provider("JWT secret not configured".to_string()));
        }
        let claims = Claims::new(user, self.expiry_hours);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| IdentityError::Provider(format!("token generation failed: {}", e)))?;

        Ok(Session {
            token,
            user: user.clone(),
            expires_in: self.expiry_hours as i64 * 3600,
        })
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, IdentityError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| IdentityError::InvalidSession)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let users = self.users.read().unwrap();
        let record = users
            .get(&email.to_ascii_lowercase())
            .ok_or(IdentityError::InvalidCredentials)?;
        if record.password_hash != Self::hash_password(password) {
            return Err(IdentityError::InvalidCredentials);
        }
        let user = record.user.clone();
        drop(users);
        self.issue_session(&user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<Session, IdentityError> {
        let key = email.to_ascii_lowercase();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name,
        };

        {
            let mut users = self.users.write().unwrap();
            if users.contains_key(&key) {
                return Err(IdentityError::EmailTaken);
            }
            users.insert(
                key,
                UserRecord { user: user.clone(), password_hash: Self::hash_password(password) },
            );
        }

        self.issue_session(&user)
    }

    async fn sign_out(&self, _token: &str) -> Result<(), IdentityError> {
        // Tokens are stateless; sign-out is client-side discard.
        Ok(())
    }

    async fn current_user(&self, token: &str) -> Result<Option<User>, IdentityError> {
        match self.decode_claims(token) {
            Ok(claims) => Ok(Some(User { id: claims.sub, email: claims.email, name: claims.name })),
            Err(IdentityError::InvalidSession) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_password(&self, token: &str, new_password: &str) -> Result<(), IdentityError> {
        let claims = self.decode_claims(token)?;
        let mut users = self.users.write().unwrap();
        let record = users
            .get_mut(&claims.email.to_ascii_lowercase())
            .ok_or(IdentityError::InvalidSession)?;
        record.password_hash = Self::hash_password(new_password);
        Ok(())
    }
}
