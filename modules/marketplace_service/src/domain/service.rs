//! Domain service - business logic orchestration

use super::authz::{authorize_found, OnMismatch};
use super::providers::{BlobStore, PaymentProvider};
use super::repository::Repositories;
use super::session::SessionResolver;
use super::validation::{validate_album, validate_guest_group};
use crate::contract::{
    AlbumInput, ConsultedStorefront, EstablishmentProfile, GuestGroup, GuestGroupInput,
    MarketplaceError, PhotoAlbum, SearchHistoryEntry, Session, StorefrontProfile, User,
};
use std::sync::Arc;
use uuid::Uuid;

/// Tunables the service reads from module configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Upper bound for a guest group's head count
    pub max_guest_count: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { max_guest_count: 500 }
    }
}

/// Domain service for the marketplace
pub struct Service {
    pub(crate) repos: Repositories,
    pub(crate) blobs: Arc<dyn BlobStore>,
    pub(crate) payments: Arc<dyn PaymentProvider>,
    sessions: Arc<dyn SessionResolver>,
    pub(crate) settings: ServiceSettings,
}

/// Log a repository or provider failure and collapse it to `Internal`
pub(crate) fn internal(component: &'static str) -> impl FnOnce(anyhow::Error) -> MarketplaceError {
    move |error| {
        tracing::error!(component, error = ?error, "Operation failed");
        MarketplaceError::Internal
    }
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        blobs: Arc<dyn BlobStore>,
        payments: Arc<dyn PaymentProvider>,
        sessions: Arc<dyn SessionResolver>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repos,
            blobs,
            payments,
            sessions,
            settings,
        }
    }

    // ===== Session =====

    /// Resolve the session carried by a request, if any
    pub fn get_session(&self, token: Option<&str>) -> Option<Session> {
        token.and_then(|token| self.sessions.resolve(token))
    }

    /// Load the account behind a session
    pub async fn current_user(&self, session: &Session) -> Result<User, MarketplaceError> {
        self.repos
            .users
            .find_by_id(session.user_id)
            .await
            .map_err(internal("session"))?
            .ok_or_else(|| MarketplaceError::not_found("user", session.user_id))
    }

    // ===== Guests =====

    /// List the caller's guest groups
    pub async fn list_guest_groups(&self, session: &Session) -> Result<Vec<GuestGroup>, MarketplaceError> {
        self.repos
            .guests
            .list_by_user(session.user_id)
            .await
            .map_err(internal("guests"))
    }

    /// Create a guest group owned by the caller
    pub async fn create_guest_group(
        &self,
        session: &Session,
        input: GuestGroupInput,
    ) -> Result<GuestGroup, MarketplaceError> {
        let valid = validate_guest_group(input, self.settings.max_guest_count)?;
        let now = chrono::Utc::now();

        let group = GuestGroup {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            name: valid.name,
            group_type: valid.group_type,
            count: valid.count,
            email: valid.email,
            phone: valid.phone,
            confirmed: false,
            notes: valid.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .repos
            .guests
            .create(&group)
            .await
            .map_err(internal("guests"))?;

        tracing::info!(user_id = %session.user_id, group_id = %created.id, count = created.count, "Guest group created");
        Ok(created)
    }

    // ===== Consulted storefronts =====

    pub async fn list_consulted_storefronts(
        &self,
        session: &Session,
    ) -> Result<Vec<ConsultedStorefront>, MarketplaceError> {
        self.repos
            .consultations
            .list_by_user(session.user_id)
            .await
            .map_err(internal("consulted-storefronts"))
    }

    /// Delete one of the caller's consultations. Records of other users are reported as missing.
    pub async fn delete_consulted_storefront(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<(), MarketplaceError> {
        let found = self
            .repos
            .consultations
            .find_by_id(id)
            .await
            .map_err(internal("consulted-storefronts"))?;
        let consultation = authorize_found(session, found, id, OnMismatch::NotFound)?;

        let deleted = self
            .repos
            .consultations
            .delete(&consultation)
            .await
            .map_err(internal("consulted-storefronts"))?;
        if !deleted {
            return Err(MarketplaceError::not_found("consulted storefront", id));
        }
        Ok(())
    }

    // ===== Search history =====

    pub async fn list_search_history(
        &self,
        session: &Session,
    ) -> Result<Vec<SearchHistoryEntry>, MarketplaceError> {
        self.repos
            .search_history
            .list_by_user(session.user_id)
            .await
            .map_err(internal("search-history"))
    }

    pub async fn delete_search_history(&self, session: &Session, id: Uuid) -> Result<(), MarketplaceError> {
        let found = self
            .repos
            .search_history
            .find_by_id(id)
            .await
            .map_err(internal("search-history"))?;
        let entry = authorize_found(session, found, id, OnMismatch::NotFound)?;

        let deleted = self
            .repos
            .search_history
            .delete(&entry)
            .await
            .map_err(internal("search-history"))?;
        if !deleted {
            return Err(MarketplaceError::not_found("search history entry", id));
        }
        Ok(())
    }

    // ===== Photos =====

    pub async fn list_albums(&self, session: &Session) -> Result<Vec<PhotoAlbum>, MarketplaceError> {
        self.repos
            .photos
            .list_albums(session.user_id)
            .await
            .map_err(internal("photos"))
    }

    pub async fn create_album(
        &self,
        session: &Session,
        input: AlbumInput,
    ) -> Result<PhotoAlbum, MarketplaceError> {
        let (name, description) = validate_album(input)?;
        let album = PhotoAlbum {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            name,
            description,
            created_at: chrono::Utc::now(),
        };

        self.repos
            .photos
            .create_album(&album)
            .await
            .map_err(internal("photos"))
    }

    /// Delete one of the caller's photos and its blob
    ///
    /// A photo owned by someone else is `Forbidden`. A blob delete failure is
    /// logged and does not prevent the record from being deleted.
    pub async fn delete_photo(&self, session: &Session, id: Uuid) -> Result<(), MarketplaceError> {
        let found = self
            .repos
            .photos
            .find_photo(id)
            .await
            .map_err(internal("photos"))?;
        let photo = authorize_found(session, found, id, OnMismatch::Forbidden)?;

        if let Err(e) = self.blobs.delete(&photo.url).await {
            tracing::error!(component = "photos", photo_id = %id, url = %photo.url, error = ?e, "Blob delete failed, deleting record anyway");
        }

        let deleted = self
            .repos
            .photos
            .delete_photo(&photo)
            .await
            .map_err(internal("photos"))?;
        if !deleted {
            return Err(MarketplaceError::not_found("photo", id));
        }

        tracing::info!(user_id = %session.user_id, photo_id = %id, "Photo deleted");
        Ok(())
    }

    // ===== Public profiles =====

    /// Storefront with its media ordered by sort key. Inactive storefronts are hidden.
    pub async fn get_storefront(&self, id: Uuid) -> Result<StorefrontProfile, MarketplaceError> {
        let storefront = self
            .repos
            .storefronts
            .find_by_id(id)
            .await
            .map_err(internal("storefront"))?
            .filter(|s| s.is_active)
            .ok_or_else(|| MarketplaceError::not_found("storefront", id))?;

        let mut media = self
            .repos
            .storefronts
            .list_media(id)
            .await
            .map_err(internal("storefront"))?;
        media.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });

        Ok(StorefrontProfile { storefront, media })
    }

    /// Establishment with its images ordered by sort key
    pub async fn get_establishment(&self, id: Uuid) -> Result<EstablishmentProfile, MarketplaceError> {
        let establishment = self
            .repos
            .establishments
            .find_by_id(id)
            .await
            .map_err(internal("establishments"))?
            .ok_or_else(|| MarketplaceError::not_found("establishment", id))?;

        let mut images = self
            .repos
            .establishments
            .list_images(id)
            .await
            .map_err(internal("establishments"))?;
        images.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));

        Ok(EstablishmentProfile {
            establishment,
            images,
        })
    }
}
