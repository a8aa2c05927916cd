//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    ConsultedStorefront, Establishment, EstablishmentImage, GuestGroup, Media, PhotoAlbum,
    SearchHistoryEntry, Storefront, SubscriptionPlan, TableCount, User, UserPhoto,
};
use super::authz::Authorized;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Repository for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Link the account to a payment provider customer
    async fn set_stripe_customer_id(&self, id: Uuid, customer_id: &str) -> Result<()>;
}

/// Repository for partner storefronts and their media
#[async_trait]
pub trait StorefrontRepository: Send + Sync {
    async fn create(&self, storefront: &Storefront) -> Result<Storefront>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Storefront>>;

    async fn find_by_partner(&self, partner_id: Uuid) -> Result<Vec<Storefront>>;

    /// Media of a storefront ordered by sort key
    async fn list_media(&self, storefront_id: Uuid) -> Result<Vec<Media>>;

    async fn find_media(&self, media_id: Uuid) -> Result<Option<Media>>;

    /// Delete one media row. Returns false if nothing was deleted.
    async fn delete_media(&self, media_id: Uuid) -> Result<bool>;

    /// Media rows whose storefront no longer exists
    async fn find_orphan_media(&self) -> Result<Vec<Media>>;
}

/// Repository for physical venues
#[async_trait]
pub trait EstablishmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Establishment>>;

    /// Images of an establishment ordered by sort key
    async fn list_images(&self, establishment_id: Uuid) -> Result<Vec<EstablishmentImage>>;
}

/// Repository for guest-list entries
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GuestGroup>>;

    async fn create(&self, group: &GuestGroup) -> Result<GuestGroup>;
}

/// Repository for consulted storefronts
#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ConsultedStorefront>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConsultedStorefront>>;

    /// Only an ownership-checked record can be deleted
    async fn delete(&self, consultation: &Authorized<ConsultedStorefront>) -> Result<bool>;
}

/// Repository for saved searches
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SearchHistoryEntry>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SearchHistoryEntry>>;

    async fn delete(&self, entry: &Authorized<SearchHistoryEntry>) -> Result<bool>;
}

/// Repository for user albums and photos
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn list_albums(&self, user_id: Uuid) -> Result<Vec<PhotoAlbum>>;

    async fn create_album(&self, album: &PhotoAlbum) -> Result<PhotoAlbum>;

    async fn find_photo(&self, id: Uuid) -> Result<Option<UserPhoto>>;

    async fn delete_photo(&self, photo: &Authorized<UserPhoto>) -> Result<bool>;
}

/// Repository for billing plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Active plans ordered by price
    async fn list_active(&self) -> Result<Vec<SubscriptionPlan>>;
}

/// Whole-database operations used by test routes and maintenance scripts
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Round-trip to the database
    async fn ping(&self) -> Result<()>;

    async fn table_counts(&self) -> Result<Vec<TableCount>>;

    /// Delete every row in a single transaction. Returns rows deleted.
    async fn reset_all(&self) -> Result<u64>;
}

/// All repositories the service depends on
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub storefronts: Arc<dyn StorefrontRepository>,
    pub establishments: Arc<dyn EstablishmentRepository>,
    pub guests: Arc<dyn GuestRepository>,
    pub consultations: Arc<dyn ConsultationRepository>,
    pub search_history: Arc<dyn SearchHistoryRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
}
