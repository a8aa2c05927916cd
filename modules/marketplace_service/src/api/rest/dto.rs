//! REST DTOs with serde derives for HTTP API
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Users =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// user, partner or admin
    #[schema(example = "partner")]
    pub role: String,
    pub stripe_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ===== Guests =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestGroupDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "family")]
    pub group_type: String,
    pub count: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub confirmed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Head count accepted as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CountValue {
    Number(i64),
    Text(String),
}

/// Guest group creation request. `name` is required; it is optional here so
/// a missing value is reported as a validation error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestGroupRequest {
    #[schema(example = "Famille Dupont")]
    pub name: Option<String>,
    /// single, couple, family or group (default single)
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    pub count: Option<CountValue>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

// ===== Storefronts =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub id: Uuid,
    pub storefront_id: Uuid,
    pub url: String,
    /// image or video
    #[serde(rename = "type")]
    pub media_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontDto {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub establishment_id: Option<Uuid>,
    pub company_name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub media: Vec<MediaDto>,
}

// ===== Establishments =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentImageDto {
    pub id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub max_capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<EstablishmentImageDto>,
}

// ===== History =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultedStorefrontDto {
    pub id: Uuid,
    pub storefront_id: Uuid,
    pub consulted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryDto {
    pub id: Uuid,
    pub query: String,
    pub filters: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

// ===== Billing =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[schema(example = "cus_NffrFeUfNV2Hib")]
    pub customer_id: String,
    /// False when the account was already linked
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlanDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit
    pub price: i64,
    pub currency: String,
    #[schema(example = "month")]
    pub interval: String,
    pub features: Vec<String>,
    pub stripe_price_id: Option<String>,
}

// ===== Photos =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateAlbumRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// ===== Test utilities =====

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestPartnerRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestPartnerDto {
    pub user: UserDto,
    pub storefront: StorefrontDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetDatabaseResponse {
    pub deleted_rows: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableCountDto {
    pub table: String,
    pub rows: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseStatusDto {
    pub connected: bool,
    pub tables: Vec<TableCountDto>,
}

// ===== Realtime =====

/// Liveness document for the socket endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocketStatusDto {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "/api/socket")]
    pub path: String,
}
