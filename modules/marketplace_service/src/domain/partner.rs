//! Partner storefront media management

use super::authz::{authorize_found, OnMismatch};
use super::service::{internal, Service};
use crate::contract::{Media, MarketplaceError, Session};
use uuid::Uuid;

impl Service {
    /// Delete a media item addressed through its storefront
    ///
    /// The storefront must belong to the caller and the media must belong to
    /// the storefront; anything else is reported as `NotFound`.
    pub async fn delete_storefront_media(
        &self,
        session: &Session,
        storefront_id: Uuid,
        media_id: Uuid,
    ) -> Result<(), MarketplaceError> {
        let found = self
            .repos
            .storefronts
            .find_by_id(storefront_id)
            .await
            .map_err(internal("partner-media"))?;
        let storefront = authorize_found(session, found, storefront_id, OnMismatch::NotFound)?;

        let media = self
            .repos
            .storefronts
            .find_media(media_id)
            .await
            .map_err(internal("partner-media"))?
            .filter(|m| m.storefront_id == storefront.id)
            .ok_or_else(|| MarketplaceError::not_found("media", media_id))?;

        self.remove_media(&media).await
    }

    /// Delete a media item addressed directly; its storefront must belong to the caller
    pub async fn delete_media(&self, session: &Session, media_id: Uuid) -> Result<(), MarketplaceError> {
        let media = self
            .repos
            .storefronts
            .find_media(media_id)
            .await
            .map_err(internal("partner-media"))?
            .ok_or_else(|| MarketplaceError::not_found("media", media_id))?;

        let found = self
            .repos
            .storefronts
            .find_by_id(media.storefront_id)
            .await
            .map_err(internal("partner-media"))?;
        // An orphaned media row is as invisible to the caller as a foreign one
        authorize_found(session, found, media.storefront_id, OnMismatch::NotFound)
            .map_err(|_| MarketplaceError::not_found("media", media_id))?;

        self.remove_media(&media).await
    }

    /// Blob first, then record. The record goes even if the blob delete fails.
    pub(crate) async fn remove_media(&self, media: &Media) -> Result<(), MarketplaceError> {
        if let Err(e) = self.blobs.delete(&media.url).await {
            tracing::error!(
                component = "partner-media",
                media_id = %media.id,
                url = %media.url,
                error = ?e,
                "Blob delete failed, deleting record anyway"
            );
        }

        let deleted = self
            .repos
            .storefronts
            .delete_media(media.id)
            .await
            .map_err(internal("partner-media"))?;
        if !deleted {
            return Err(MarketplaceError::not_found("media", media.id));
        }

        tracing::info!(storefront_id = %media.storefront_id, media_id = %media.id, "Media deleted");
        Ok(())
    }
}
