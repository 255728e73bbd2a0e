use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Profile row keyed by user id. Opaque to the core; the topbar shows the
/// display name and initials derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}

impl Profile {
    /// Display name fallback chain: full name, then the email local part,
    /// then the generic placeholder.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref() {
            if !name.trim().is_empty() {
                return name.to_string();
            }
        }
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => "Usuário".to_string(),
        }
    }

    /// Up to two uppercase initials from the display name's words.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile store error: {0}")]
    Store(String),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileError>;
    async fn upsert(&self, profile: Profile) -> Result<(), ProfileError>;
}

/// In-memory store; enough for a single-process hub.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileError> {
        Ok(self.profiles.read().unwrap().get(&user_id).cloned())
    }

    async fn upsert(&self, profile: Profile) -> Result<(), ProfileError> {
        self.profiles.write().unwrap().insert(profile.user_id, profile);
        Ok(())
    }
}
