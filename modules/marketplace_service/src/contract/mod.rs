//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::MarketplaceApi;
pub use error::MarketplaceError;
pub use model::{
    AlbumInput, BatchReport, ConsultedStorefront, CustomerLink, DatabaseStatus, Establishment,
    EstablishmentImage, EstablishmentProfile, GuestCount, GuestGroup, GuestGroupInput, GuestType,
    Media, MediaType, PhotoAlbum, Role, SearchHistoryEntry, Session, Storefront,
    StorefrontProfile, SubscriptionPlan, TableCount, TestPartner, TestPartnerInput, User,
    UserInspection, UserPhoto,
};
