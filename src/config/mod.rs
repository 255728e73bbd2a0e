use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::automation::Variant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub webhook: WebhookConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Settings for the automation trigger pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Destination of the duplicate-drive payload. Empty means dispatch
    /// fails with the config-missing message instead of calling out.
    pub url: String,
    pub auto_navigate_on_success: bool,
    pub navigate_path: String,
    pub success_delay_ms: u64,
    pub variant: Variant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Webhook overrides
        if let Ok(v) = env::var("WEBHOOK_URL") {
            self.webhook.url = v;
        }
        if let Ok(v) = env::var("AUTO_NAVIGATE_ON_SUCCESS") {
            self.webhook.auto_navigate_on_success =
                v.parse().unwrap_or(self.webhook.auto_navigate_on_success);
        }
        if let Ok(v) = env::var("SUCCESS_NAVIGATE_PATH") {
            self.webhook.navigate_path = v;
        }
        if let Ok(v) = env::var("SUCCESS_DELAY_MS") {
            self.webhook.success_delay_ms = v.parse().unwrap_or(self.webhook.success_delay_ms);
        }
        if let Ok(v) = env::var("AUTOMATION_VARIANT") {
            self.webhook.variant = v.parse().unwrap_or(self.webhook.variant);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("HUB_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            webhook: WebhookConfig {
                url: String::new(),
                auto_navigate_on_success: true,
                navigate_path: "/dashboard".to_string(),
                success_delay_ms: 1500,
                variant: Variant::Restricted,
            },
            api: ApiConfig { enable_request_logging: true },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                jwt_secret: "dev-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            webhook: WebhookConfig {
                url: String::new(),
                auto_navigate_on_success: true,
                navigate_path: "/dashboard".to_string(),
                success_delay_ms: 1500,
                variant: Variant::Restricted,
            },
            api: ApiConfig { enable_request_logging: true },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.hub.grupoimpetus.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            webhook: WebhookConfig {
                url: "https://n8n.grupoimpetus.com/webhook/duplicate-drive-folder".to_string(),
                auto_navigate_on_success: true,
                navigate_path: "/dashboard".to_string(),
                success_delay_ms: 1500,
                variant: Variant::Restricted,
            },
            api: ApiConfig { enable_request_logging: false },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://hub.grupoimpetus.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert!(config.webhook.url.is_empty());
        assert!(config.webhook.auto_navigate_on_success);
        assert_eq!(config.webhook.navigate_path, "/dashboard");
        assert_eq!(config.webhook.success_delay_ms, 1500);
        assert_eq!(config.webhook.variant, Variant::Restricted);
    }

    #[test]
    fn production_points_at_the_n8n_webhook() {
        let config = AppConfig::production();
        assert_eq!(
            config.webhook.url,
            "https://n8n.grupoimpetus.com/webhook/duplicate-drive-folder"
        );
        assert!(config.security.jwt_secret.is_empty());
    }
}
