//! External provider seams: blob storage and payments
//!
//! Implementations live in `infra/`; the no-op blob store is used when no
//! storage credentials are configured.

use async_trait::async_trait;
use uuid::Uuid;

/// External object store addressed by URL
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Delete a single object by its public URL
    async fn delete(&self, url: &str) -> anyhow::Result<()>;

    /// Delete every object under `prefix`. Returns the number deleted.
    async fn delete_prefix(&self, prefix: &str) -> anyhow::Result<usize>;
}

/// Blob store that deletes nothing
pub struct NoOpBlobStore;

#[async_trait]
impl BlobStore for NoOpBlobStore {
    async fn delete(&self, url: &str) -> anyhow::Result<()> {
        tracing::debug!(url, "Blob store disabled, skipping delete");
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> anyhow::Result<usize> {
        tracing::debug!(prefix, "Blob store disabled, skipping prefix delete");
        Ok(0)
    }
}

/// Payment provider customer management
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a customer and return its provider id
    async fn create_customer(
        &self,
        email: &str,
        name: Option<&str>,
        user_id: Uuid,
    ) -> anyhow::Result<String>;
}

/// Payment provider used when no secret key is configured
pub struct UnconfiguredPayments;

#[async_trait]
impl PaymentProvider for UnconfiguredPayments {
    async fn create_customer(&self, _email: &str, _name: Option<&str>, user_id: Uuid) -> anyhow::Result<String> {
        anyhow::bail!("payment provider is not configured, cannot create customer for {user_id}")
    }
}
