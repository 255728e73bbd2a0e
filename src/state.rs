use std::sync::Arc;

use crate::automation::WebhookClient;
use crate::config::AppConfig;
use crate::identity::{IdentityProvider, JwtIdentityProvider, MemoryProfileStore, ProfileStore};

/// Shared handler state: the identity/profile seams and the webhook client.
/// Everything else comes from the global config.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub webhook: WebhookClient,
}

impl AppState {
    /// Default wiring: JWT identity, in-memory profiles, reqwest transport.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            identity: Arc::new(JwtIdentityProvider::new(
                config.security.jwt_secret.clone(),
                config.security.jwt_expiry_hours,
            )),
            profiles: Arc::new(MemoryProfileStore::new()),
            webhook: WebhookClient::http(),
        }
    }
}
