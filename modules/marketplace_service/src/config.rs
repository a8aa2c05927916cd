//! Configuration for the marketplace service module

use serde::Deserialize;

/// Marketplace service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection URL (postgres:// or sqlite://)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// External socket server the clients connect to
    #[serde(default)]
    pub socket_url: Option<String>,

    /// Path of the socket liveness endpoint
    #[serde(default = "default_socket_path")]
    pub socket_path: String,

    #[serde(default)]
    pub stripe_secret_key: Option<String>,

    #[serde(default = "default_stripe_api_base")]
    pub stripe_api_base: String,

    /// HS256 secret shared with the authentication provider
    #[serde(default)]
    pub session_secret: Option<String>,

    #[serde(default)]
    pub blob_api_url: Option<String>,

    /// Read-write token for the blob store. Without it blob deletes are skipped.
    #[serde(default)]
    pub blob_token: Option<String>,

    /// `production` disables the test utility routes
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Upper bound for a guest group's head count
    #[serde(default = "default_max_guest_count")]
    pub max_guest_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            socket_url: None,
            socket_path: default_socket_path(),
            stripe_secret_key: None,
            stripe_api_base: default_stripe_api_base(),
            session_secret: None,
            blob_api_url: None,
            blob_token: None,
            environment: default_environment(),
            bind_addr: default_bind_addr(),
            max_guest_count: default_max_guest_count(),
        }
    }
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn default_database_url() -> String {
    "sqlite://marketplace.db?mode=rwc".to_string()
}

fn default_socket_path() -> String {
    "/api/socket".to_string()
}

fn default_stripe_api_base() -> String {
    crate::infra::payments::DEFAULT_STRIPE_API_BASE.to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_guest_count() -> u32 {
    500
}
