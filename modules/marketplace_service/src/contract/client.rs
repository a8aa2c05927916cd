//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the marketplace.
//! NO HTTP - direct function calls for performance.

use super::{
    error::MarketplaceError,
    model::{
        AlbumInput, CustomerLink, EstablishmentProfile, GuestGroup, GuestGroupInput, PhotoAlbum,
        Session, StorefrontProfile, SubscriptionPlan, User,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Marketplace API for inter-module communication
///
/// Callers pass an already-resolved [`Session`]; token verification is the
/// transport's job.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    // ===== Accounts =====

    async fn current_user(&self, session: &Session) -> Result<User, MarketplaceError>;

    // ===== Public profiles =====

    async fn get_storefront(&self, id: Uuid) -> Result<StorefrontProfile, MarketplaceError>;

    async fn get_establishment(&self, id: Uuid) -> Result<EstablishmentProfile, MarketplaceError>;

    // ===== Guests =====

    async fn list_guest_groups(&self, session: &Session) -> Result<Vec<GuestGroup>, MarketplaceError>;

    async fn create_guest_group(
        &self,
        session: &Session,
        input: GuestGroupInput,
    ) -> Result<GuestGroup, MarketplaceError>;

    // ===== Photos =====

    async fn list_albums(&self, session: &Session) -> Result<Vec<PhotoAlbum>, MarketplaceError>;

    async fn create_album(&self, session: &Session, input: AlbumInput) -> Result<PhotoAlbum, MarketplaceError>;

    async fn delete_photo(&self, session: &Session, id: Uuid) -> Result<(), MarketplaceError>;

    // ===== Billing =====

    async fn create_customer(&self, session: &Session) -> Result<CustomerLink, MarketplaceError>;

    async fn list_subscription_plans(&self) -> Result<Vec<SubscriptionPlan>, MarketplaceError>;
}
