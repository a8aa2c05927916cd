//! Module wiring and lifecycle
//!
//! Owns the database handle and the domain service. Construction opens the
//! database and builds every dependency explicitly; `shutdown` closes it.

use crate::api::native::NativeClient;
use crate::api::rest::{register_routes, RouteOptions};
use crate::config::Config;
use crate::contract::MarketplaceApi;
use crate::domain::{
    BlobStore, NoOpBlobStore, PaymentProvider, Service, ServiceSettings, SessionResolver,
    UnconfiguredPayments,
};
use crate::infra::blob::DEFAULT_BLOB_API_URL;
use crate::infra::storage::{build_repositories, migrations::Migrator, DbHandle};
use crate::infra::{HttpBlobStore, JwtSessionResolver, StripeClient};
use anyhow::Result;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Applied/pending state of one schema migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Marketplace service module
pub struct MarketplaceModule {
    config: Config,
    db: DbHandle,
    service: Arc<Service>,
}

impl MarketplaceModule {
    /// Open the configured database and build the service
    pub async fn init(config: Config) -> Result<Self> {
        let db = DbHandle::open(&config.database_url).await?;
        Self::with_db(config, db)
    }

    /// Build the service over an already opened database
    pub fn with_db(config: Config, db: DbHandle) -> Result<Self> {
        let repos = build_repositories(&db);
        let blobs = build_blob_store(&config)?;
        let payments = build_payments(&config)?;
        let sessions = build_session_resolver(&config);
        let settings = ServiceSettings {
            max_guest_count: config.max_guest_count,
        };

        let service = Arc::new(Service::new(repos, blobs, payments, sessions, settings));
        tracing::info!(environment = %config.environment, "Marketplace service initialized");

        Ok(Self { config, db, service })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn MarketplaceApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&*self.db.conn(), None).await?;
        tracing::info!("Marketplace migrations completed");
        Ok(())
    }

    /// Report every known migration and whether it has been applied
    pub async fn check_migrations(&self) -> Result<Vec<MigrationState>> {
        let conn = self.db.conn();
        let applied = Migrator::get_applied_migrations(&*conn).await?;
        let pending = Migrator::get_pending_migrations(&*conn).await?;

        let states = applied
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: true,
            })
            .chain(pending.iter().map(|m| MigrationState {
                name: m.name().to_string(),
                applied: false,
            }))
            .collect();
        Ok(states)
    }

    /// Router with every REST endpoint mounted
    pub fn router(&self) -> axum::Router {
        let options = RouteOptions {
            enable_test_routes: !self.config.is_production(),
            socket_path: self.config.socket_path.clone(),
        };
        register_routes(axum::Router::new(), self.service.clone(), &options)
    }

    /// Drop the service and close the database
    pub async fn shutdown(self) -> Result<()> {
        let Self { db, service, .. } = self;
        drop(service);
        db.close().await
    }
}

fn build_blob_store(config: &Config) -> Result<Arc<dyn BlobStore>> {
    match &config.blob_token {
        Some(token) => {
            let base = config.blob_api_url.as_deref().unwrap_or(DEFAULT_BLOB_API_URL);
            Ok(Arc::new(HttpBlobStore::new(base, token.clone())?))
        }
        None => {
            tracing::warn!("No blob token configured, blob deletes are disabled");
            Ok(Arc::new(NoOpBlobStore))
        }
    }
}

fn build_payments(config: &Config) -> Result<Arc<dyn PaymentProvider>> {
    match &config.stripe_secret_key {
        Some(key) => Ok(Arc::new(StripeClient::new(config.stripe_api_base.clone(), key.clone())?)),
        None => {
            tracing::warn!("No Stripe secret key configured, customer creation will fail");
            Ok(Arc::new(UnconfiguredPayments))
        }
    }
}

fn build_session_resolver(config: &Config) -> Arc<dyn SessionResolver> {
    match &config.session_secret {
        Some(secret) => Arc::new(JwtSessionResolver::new(secret)),
        None => {
            // A throwaway secret verifies nothing, so every request is anonymous
            tracing::warn!("No session secret configured, all requests are unauthenticated");
            Arc::new(JwtSessionResolver::new(&uuid::Uuid::new_v4().to_string()))
        }
    }
}
