pub mod auth;
pub mod automations;
pub mod profile;
