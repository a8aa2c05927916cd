//! Test-only utilities and operational scripts

use super::service::{internal, Service};
use super::validation::{non_blank, validate_email};
use crate::contract::{
    BatchReport, DatabaseStatus, MarketplaceError, Role, Storefront, TestPartner, TestPartnerInput,
    User, UserInspection,
};
use uuid::Uuid;

/// Blob prefix under which a storefront's uploads live
pub fn storefront_blob_prefix(storefront_id: Uuid) -> String {
    format!("storefronts/{}/", storefront_id)
}

impl Service {
    /// Create a partner account with an active storefront
    pub async fn create_test_partner(&self, input: TestPartnerInput) -> Result<TestPartner, MarketplaceError> {
        let suffix = Uuid::new_v4().simple().to_string();
        let email = non_blank(input.email)
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| format!("partner-{}@test.local", &suffix[..8]));
        validate_email(&email)?;

        if self
            .repos
            .users
            .find_by_email(&email)
            .await
            .map_err(internal("test"))?
            .is_some()
        {
            return Err(MarketplaceError::validation(format!("account '{}' already exists", email)));
        }

        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            name: Some(non_blank(input.name).unwrap_or_else(|| "Test Partner".to_string())),
            role: Role::Partner,
            stripe_customer_id: None,
            created_at: now,
            updated_at: now,
        };
        let user = self.repos.users.create(&user).await.map_err(internal("test"))?;

        let storefront = Storefront {
            id: Uuid::new_v4(),
            partner_id: user.id,
            establishment_id: None,
            company_name: non_blank(input.company_name).unwrap_or_else(|| "Test Storefront".to_string()),
            description: None,
            logo_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let storefront = self
            .repos
            .storefronts
            .create(&storefront)
            .await
            .map_err(internal("test"))?;

        tracing::info!(user_id = %user.id, storefront_id = %storefront.id, "Test partner created");
        Ok(TestPartner { user, storefront })
    }

    /// Delete every row in every table, atomically
    pub async fn reset_database(&self) -> Result<u64, MarketplaceError> {
        let deleted = self
            .repos
            .maintenance
            .reset_all()
            .await
            .map_err(internal("test"))?;
        tracing::warn!(rows = deleted, "Database reset");
        Ok(deleted)
    }

    /// Connectivity and per-table row counts
    pub async fn database_status(&self) -> Result<DatabaseStatus, MarketplaceError> {
        if let Err(e) = self.repos.maintenance.ping().await {
            tracing::error!(component = "test-db", error = ?e, "Database ping failed");
            return Ok(DatabaseStatus {
                connected: false,
                tables: Vec::new(),
            });
        }

        let tables = self
            .repos
            .maintenance
            .table_counts()
            .await
            .map_err(internal("test-db"))?;
        Ok(DatabaseStatus {
            connected: true,
            tables,
        })
    }

    /// Remove media rows whose storefront is gone, along with their blobs
    ///
    /// Each item is attempted independently; failures are collected in the
    /// report rather than aborting the run.
    pub async fn cleanup_orphan_media(&self) -> Result<BatchReport, MarketplaceError> {
        let orphans = self
            .repos
            .storefronts
            .find_orphan_media()
            .await
            .map_err(internal("maintenance"))?;

        let mut report = BatchReport::default();
        for media in orphans {
            if let Err(e) = self.blobs.delete(&media.url).await {
                tracing::warn!(media_id = %media.id, error = ?e, "Orphan blob delete failed");
                report.record_failure(media.id, format!("blob delete failed: {}", e));
                continue;
            }
            match self.repos.storefronts.delete_media(media.id).await {
                Ok(true) => report.record_success(media.id),
                Ok(false) => report.record_failure(media.id, "record already gone"),
                Err(e) => {
                    tracing::warn!(media_id = %media.id, error = ?e, "Orphan media delete failed");
                    report.record_failure(media.id, format!("record delete failed: {}", e));
                }
            }
        }

        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Orphan media cleanup finished"
        );
        Ok(report)
    }

    /// Delete every upload of a storefront: the blob prefix, then each media row
    pub async fn purge_storefront_media(&self, storefront_id: Uuid) -> Result<BatchReport, MarketplaceError> {
        let media = self
            .repos
            .storefronts
            .list_media(storefront_id)
            .await
            .map_err(internal("maintenance"))?;

        let prefix = storefront_blob_prefix(storefront_id);
        match self.blobs.delete_prefix(&prefix).await {
            Ok(count) => tracing::info!(prefix = %prefix, count, "Blob prefix deleted"),
            Err(e) => tracing::warn!(prefix = %prefix, error = ?e, "Blob prefix delete failed"),
        }

        let mut report = BatchReport::default();
        for item in media {
            match self.repos.storefronts.delete_media(item.id).await {
                Ok(true) => report.record_success(item.id),
                Ok(false) => report.record_failure(item.id, "record already gone"),
                Err(e) => report.record_failure(item.id, format!("record delete failed: {}", e)),
            }
        }
        Ok(report)
    }

    /// Role and billing linkage of an account
    pub async fn inspect_user(&self, email: &str) -> Result<UserInspection, MarketplaceError> {
        let email = email.trim().to_ascii_lowercase();
        let user = self
            .repos
            .users
            .find_by_email(&email)
            .await
            .map_err(internal("maintenance"))?
            .ok_or_else(|| MarketplaceError::not_found("user", &email))?;

        let storefront_ids = self
            .repos
            .storefronts
            .find_by_partner(user.id)
            .await
            .map_err(internal("maintenance"))?
            .into_iter()
            .map(|s| s.id)
            .collect();

        Ok(UserInspection { user, storefront_ids })
    }
}
