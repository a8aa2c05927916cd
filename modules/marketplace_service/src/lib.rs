//! Marketplace Service Module
//!
//! Backend of a wedding marketplace: partner storefronts and their media,
//! venues, guest lists, consultation and search history, user photo albums,
//! payment customers and subscription plans. Also carries the client side of
//! the real-time messaging glue and the gallery keyboard navigator.

// Public exports
pub mod contract;
pub use contract::{client::MarketplaceApi, error::MarketplaceError, Role, Session};

pub mod module;
pub use module::{MarketplaceModule, MigrationState};

pub mod config;
pub use config::Config;

pub mod realtime;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
