//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    AlbumInput, CustomerLink, EstablishmentProfile, GuestGroup, GuestGroupInput, MarketplaceApi,
    MarketplaceError, PhotoAlbum, Session, StorefrontProfile, SubscriptionPlan, User,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MarketplaceApi for NativeClient {
    async fn current_user(&self, session: &Session) -> Result<User, MarketplaceError> {
        self.service.current_user(session).await
    }

    async fn get_storefront(&self, id: Uuid) -> Result<StorefrontProfile, MarketplaceError> {
        self.service.get_storefront(id).await
    }

    async fn get_establishment(&self, id: Uuid) -> Result<EstablishmentProfile, MarketplaceError> {
        self.service.get_establishment(id).await
    }

    async fn list_guest_groups(&self, session: &Session) -> Result<Vec<GuestGroup>, MarketplaceError> {
        self.service.list_guest_groups(session).await
    }

    async fn create_guest_group(
        &self,
        session: &Session,
        input: GuestGroupInput,
    ) -> Result<GuestGroup, MarketplaceError> {
        self.service.create_guest_group(session, input).await
    }

    async fn list_albums(&self, session: &Session) -> Result<Vec<PhotoAlbum>, MarketplaceError> {
        self.service.list_albums(session).await
    }

    async fn create_album(&self, session: &Session, input: AlbumInput) -> Result<PhotoAlbum, MarketplaceError> {
        self.service.create_album(session, input).await
    }

    async fn delete_photo(&self, session: &Session, id: Uuid) -> Result<(), MarketplaceError> {
        self.service.delete_photo(session, id).await
    }

    async fn create_customer(&self, session: &Session) -> Result<CustomerLink, MarketplaceError> {
        self.service.create_customer(session).await
    }

    async fn list_subscription_plans(&self) -> Result<Vec<SubscriptionPlan>, MarketplaceError> {
        self.service.list_subscription_plans().await
    }
}
