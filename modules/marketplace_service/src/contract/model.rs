//! Contract models for the marketplace service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// End user planning a wedding
    User,
    /// Vendor or venue operating a storefront
    Partner,
    /// Back-office operator
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Partner => "partner",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored role. Unknown values fall back to `User`.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "partner" => Role::Partner,
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    /// Whether this role may manage a partner storefront
    pub fn can_manage_storefront(&self) -> bool {
        matches!(self, Role::Partner | Role::Admin)
    }
}

/// Authenticated identity resolved from the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Account holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    /// Customer id at the payment provider, once created
    pub stripe_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A vendor or venue's public marketplace profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storefront {
    pub id: Uuid,
    /// Owning partner account
    pub partner_id: Uuid,
    /// Physical venue, when the storefront represents one
    pub establishment_id: Option<Uuid>,
    pub company_name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storefront together with its ordered media list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontProfile {
    pub storefront: Storefront,
    pub media: Vec<Media>,
}

/// Kind of uploaded asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "video" => MediaType::Video,
            _ => MediaType::Image,
        }
    }
}

/// Uploaded storefront asset backed by a blob store object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: Uuid,
    pub storefront_id: Uuid,
    pub url: String,
    pub media_type: MediaType,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Sort key, gaps and ties allowed
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A physical venue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub max_capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentImage {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
}

/// Establishment together with its ordered images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentProfile {
    pub establishment: Establishment,
    pub images: Vec<EstablishmentImage>,
}

/// Guest list entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestType {
    Single,
    Couple,
    Family,
    Group,
}

impl GuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestType::Single => "single",
            GuestType::Couple => "couple",
            GuestType::Family => "family",
            GuestType::Group => "group",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "single" => Some(GuestType::Single),
            "couple" => Some(GuestType::Couple),
            "family" => Some(GuestType::Family),
            "group" => Some(GuestType::Group),
            _ => None,
        }
    }
}

/// Wedding guest-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestGroup {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub group_type: GuestType,
    /// Number of people in the group
    pub count: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub confirmed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guest count as submitted by a client, either a number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestCount {
    Number(i64),
    Text(String),
}

/// Unvalidated guest group submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestGroupInput {
    pub name: Option<String>,
    pub group_type: Option<String>,
    pub count: Option<GuestCount>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Logged user-storefront interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultedStorefront {
    pub id: Uuid,
    pub user_id: Uuid,
    pub storefront_id: Uuid,
    pub consulted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub query: String,
    pub filters: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAlbum {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated album submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Photo uploaded by an end user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPhoto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub album_id: Option<Uuid>,
    pub url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Billing plan mirrored from the payment provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit
    pub price_cents: i64,
    pub currency: String,
    pub billing_interval: String,
    pub features: Vec<String>,
    pub is_active: bool,
    pub stripe_price_id: Option<String>,
}

/// Result of a create-customer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerLink {
    pub customer_id: String,
    /// False when the account was already linked
    pub created: bool,
}

/// Input for the test-only partner factory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestPartnerInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPartner {
    pub user: User,
    pub storefront: Storefront,
}

/// Row count for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: String,
    pub rows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStatus {
    pub connected: bool,
    pub tables: Vec<TableCount>,
}

/// Outcome of a multi-item maintenance operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<Uuid>,
    pub failed: Vec<(Uuid, String)>,
}

impl BatchReport {
    pub fn record_success(&mut self, id: Uuid) {
        self.succeeded.push(id);
    }

    pub fn record_failure(&mut self, id: Uuid, reason: impl Into<String>) {
        self.failed.push((id, reason.into()));
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Role and billing linkage of an account, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInspection {
    pub user: User,
    pub storefront_ids: Vec<Uuid>,
}
