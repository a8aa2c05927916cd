//! HTTP request handlers - thin layer that delegates to domain service
//!
//! Each handler resolves the session first so unauthenticated requests fail
//! with 401 before any body is inspected.

use super::auth::MaybeSession;
use super::dto::*;
use super::error::{map_json_rejection, Problem};
use crate::domain::validation::parse_id;
use crate::domain::{require_auth, require_partner_auth, Service};
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

type Svc = Extension<Arc<Service>>;

// ===== Guests =====

pub async fn list_guests(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
) -> Result<Json<Vec<GuestGroupDto>>, Problem> {
    let session = require_auth(session)?;
    let groups = service.list_guest_groups(&session).await?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

pub async fn create_guest(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    body: Result<Json<CreateGuestGroupRequest>, JsonRejection>,
) -> Result<Json<GuestGroupDto>, Problem> {
    let session = require_auth(session)?;
    let Json(req) = body.map_err(map_json_rejection)?;
    let group = service.create_guest_group(&session, req.into()).await?;
    Ok(Json(group.into()))
}

// ===== Consulted storefronts =====

pub async fn list_consulted_storefronts(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
) -> Result<Json<Vec<ConsultedStorefrontDto>>, Problem> {
    let session = require_auth(session)?;
    let items = service.list_consulted_storefronts(&session).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn delete_consulted_storefront(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    let session = require_auth(session)?;
    let id = parse_id("consulted storefront", &id)?;
    service.delete_consulted_storefront(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Search history =====

pub async fn list_search_history(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
) -> Result<Json<Vec<SearchHistoryDto>>, Problem> {
    let session = require_auth(session)?;
    let items = service.list_search_history(&session).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn delete_search_history(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    let session = require_auth(session)?;
    let id = parse_id("search history entry", &id)?;
    service.delete_search_history(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Partner media =====

pub async fn delete_storefront_media(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    Path((storefront_id, media_id)): Path<(String, String)>,
) -> Result<StatusCode, Problem> {
    let session = require_partner_auth(session)?;
    let storefront_id = parse_id("storefront", &storefront_id)?;
    let media_id = parse_id("media", &media_id)?;
    service
        .delete_storefront_media(&session, storefront_id, media_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_media(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    Path(media_id): Path<String>,
) -> Result<StatusCode, Problem> {
    let session = require_partner_auth(session)?;
    let media_id = parse_id("media", &media_id)?;
    service.delete_media(&session, media_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Public profiles =====

pub async fn get_storefront(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<StorefrontDto>, Problem> {
    let id = parse_id("storefront", &id)?;
    let profile = service.get_storefront(id).await?;
    Ok(Json(profile.into()))
}

pub async fn get_establishment(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<EstablishmentDto>, Problem> {
    let id = parse_id("establishment", &id)?;
    let profile = service.get_establishment(id).await?;
    Ok(Json(profile.into()))
}

// ===== Billing =====

pub async fn create_customer(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
) -> Result<Json<CustomerDto>, Problem> {
    let session = require_auth(session)?;
    let link = service.create_customer(&session).await?;
    Ok(Json(link.into()))
}

pub async fn list_subscription_plans(
    Extension(service): Svc,
) -> Result<Json<Vec<SubscriptionPlanDto>>, Problem> {
    let plans = service.list_subscription_plans().await?;
    Ok(Json(plans.into_iter().map(Into::into).collect()))
}

// ===== Photos =====

pub async fn list_albums(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
) -> Result<Json<Vec<AlbumDto>>, Problem> {
    let session = require_auth(session)?;
    let albums = service.list_albums(&session).await?;
    Ok(Json(albums.into_iter().map(Into::into).collect()))
}

pub async fn create_album(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    body: Result<Json<CreateAlbumRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AlbumDto>), Problem> {
    let session = require_auth(session)?;
    let Json(req) = body.map_err(map_json_rejection)?;
    let album = service.create_album(&session, req.into()).await?;
    Ok((StatusCode::CREATED, Json(album.into())))
}

pub async fn delete_photo(
    Extension(service): Svc,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    let session = require_auth(session)?;
    let id = parse_id("photo", &id)?;
    service.delete_photo(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Test utilities =====

pub async fn create_test_partner(
    Extension(service): Svc,
    body: Result<Json<CreateTestPartnerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TestPartnerDto>), Problem> {
    // Every field is optional, so an empty request is accepted
    let req = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateTestPartnerRequest::default(),
        Err(rejection) => return Err(map_json_rejection(rejection)),
    };
    let partner = service.create_test_partner(req.into()).await?;
    Ok((StatusCode::CREATED, Json(partner.into())))
}

pub async fn reset_database(Extension(service): Svc) -> Result<Json<ResetDatabaseResponse>, Problem> {
    let deleted_rows = service.reset_database().await?;
    Ok(Json(ResetDatabaseResponse { deleted_rows }))
}

pub async fn database_status(Extension(service): Svc) -> Result<Json<DatabaseStatusDto>, Problem> {
    let status = service.database_status().await?;
    Ok(Json(status.into()))
}
