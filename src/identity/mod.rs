// Identity provider and profile store seams. The hub itself only needs
// `current_user` to gate the API surface; the remaining operations exist so
// the login/signup/password flows can be served through the same trait and a
// deployment can swap in an external provider without touching handlers.

pub mod jwt;
pub mod profile;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use jwt::JwtIdentityProvider;
pub use profile::{MemoryProfileStore, Profile, ProfileStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

/// An authenticated session: the bearer token plus who it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_in: i64,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<Session, IdentityError>;

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError>;

    /// Resolve the user behind a bearer token; `None` when the token does
    /// not map to a live session.
    async fn current_user(&self, token: &str) -> Result<Option<User>, IdentityError>;

    async fn update_password(&self, token: &str, new_password: &str) -> Result<(), IdentityError>;
}
