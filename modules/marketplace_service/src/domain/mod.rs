//! Domain layer - business logic and services

pub mod authz;
pub mod billing;
pub mod gallery;
pub mod maintenance;
pub mod partner;
pub mod providers;
pub mod repository;
pub mod service;
pub mod session;
pub mod validation;

pub use authz::{authorize, authorize_found, Authorized, OnMismatch, Owned};
pub use providers::{BlobStore, NoOpBlobStore, PaymentProvider, UnconfiguredPayments};
pub use repository::Repositories;
pub use service::{Service, ServiceSettings};
pub use session::{require_auth, require_partner_auth, SessionResolver};
