//! Ownership checks applied before any owner-scoped read or mutation

use crate::contract::{
    ConsultedStorefront, MarketplaceError, PhotoAlbum, SearchHistoryEntry, Session, Storefront,
    UserPhoto,
};
use std::ops::Deref;
use uuid::Uuid;

/// A record that belongs to exactly one account
pub trait Owned {
    /// Resource name used in error messages
    const RESOURCE: &'static str;

    fn resource_id(&self) -> Uuid;

    fn owner_id(&self) -> Uuid;
}

/// How to report a record that exists but belongs to someone else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMismatch {
    /// Hide the record entirely
    NotFound,
    /// Reveal that it exists
    Forbidden,
}

/// Proof that the session owns the wrapped resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized<T>(T);

impl<T> Authorized<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Authorized<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Check that `session` owns `resource`
pub fn authorize<T: Owned>(
    session: &Session,
    resource: T,
    on_mismatch: OnMismatch,
) -> Result<Authorized<T>, MarketplaceError> {
    if resource.owner_id() == session.user_id {
        return Ok(Authorized(resource));
    }

    tracing::warn!(
        resource = T::RESOURCE,
        id = %resource.resource_id(),
        user_id = %session.user_id,
        "Ownership check failed"
    );

    Err(match on_mismatch {
        OnMismatch::NotFound => MarketplaceError::not_found(T::RESOURCE, resource.resource_id()),
        OnMismatch::Forbidden => MarketplaceError::forbidden(T::RESOURCE, resource.resource_id()),
    })
}

/// Like [`authorize`] for a lookup result; a missing record is `NotFound`
pub fn authorize_found<T: Owned>(
    session: &Session,
    resource: Option<T>,
    id: Uuid,
    on_mismatch: OnMismatch,
) -> Result<Authorized<T>, MarketplaceError> {
    match resource {
        Some(resource) => authorize(session, resource, on_mismatch),
        None => Err(MarketplaceError::not_found(T::RESOURCE, id)),
    }
}

impl Owned for Storefront {
    const RESOURCE: &'static str = "storefront";

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.partner_id
    }
}

impl Owned for ConsultedStorefront {
    const RESOURCE: &'static str = "consulted storefront";

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for SearchHistoryEntry {
    const RESOURCE: &'static str = "search history entry";

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for UserPhoto {
    const RESOURCE: &'static str = "photo";

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for PhotoAlbum {
    const RESOURCE: &'static str = "album";

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
