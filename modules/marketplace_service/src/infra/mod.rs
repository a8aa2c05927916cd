//! Infrastructure: persistence and external provider clients

pub mod blob;
pub mod payments;
pub mod session;
pub mod storage;

pub use blob::HttpBlobStore;
pub use payments::StripeClient;
pub use session::JwtSessionResolver;
