//! SeaORM repository implementations

use crate::contract::{
    ConsultedStorefront, Establishment, EstablishmentImage, GuestGroup, Media, PhotoAlbum,
    SearchHistoryEntry, Storefront, SubscriptionPlan, TableCount, User, UserPhoto,
};
use crate::domain::authz::Authorized;
use crate::domain::repository::{
    ConsultationRepository, EstablishmentRepository, GuestRepository, MaintenanceRepository,
    PhotoRepository, PlanRepository, Repositories, SearchHistoryRepository, StorefrontRepository,
    UserRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, sea_query::Query, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::db::DbHandle;
use super::entity::{
    consulted_storefront, establishment, establishment_image, guest_group, media, photo_album,
    search_history, storefront, subscription_plan, user, user_photo,
};

/// Build every SeaORM repository over one database handle
pub fn build_repositories(db: &DbHandle) -> Repositories {
    let conn = db.conn();
    Repositories {
        users: Arc::new(SeaOrmUserRepository::new(conn.clone())),
        storefronts: Arc::new(SeaOrmStorefrontRepository::new(conn.clone())),
        establishments: Arc::new(SeaOrmEstablishmentRepository::new(conn.clone())),
        guests: Arc::new(SeaOrmGuestRepository::new(conn.clone())),
        consultations: Arc::new(SeaOrmConsultationRepository::new(conn.clone())),
        search_history: Arc::new(SeaOrmSearchHistoryRepository::new(conn.clone())),
        photos: Arc::new(SeaOrmPhotoRepository::new(conn.clone())),
        plans: Arc::new(SeaOrmPlanRepository::new(conn.clone())),
        maintenance: Arc::new(SeaOrmMaintenanceRepository::new(conn)),
    }
}

// ===== Users =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let active: user::ActiveModel = user.into();
        let result = user::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let result = user::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn set_stripe_customer_id(&self, id: Uuid, customer_id: &str) -> Result<()> {
        user::Entity::update_many()
            .col_expr(user::Column::StripeCustomerId, Expr::value(customer_id))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Storefronts =====

pub struct SeaOrmStorefrontRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStorefrontRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StorefrontRepository for SeaOrmStorefrontRepository {
    async fn create(&self, s: &Storefront) -> Result<Storefront> {
        let active: storefront::ActiveModel = s.into();
        let result = storefront::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Storefront>> {
        let result = storefront::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_partner(&self, partner_id: Uuid) -> Result<Vec<Storefront>> {
        let results = storefront::Entity::find()
            .filter(storefront::Column::PartnerId.eq(partner_id))
            .order_by_asc(storefront::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_media(&self, storefront_id: Uuid) -> Result<Vec<Media>> {
        let results = media::Entity::find()
            .filter(media::Column::StorefrontId.eq(storefront_id))
            .order_by_asc(media::Column::SortOrder)
            .order_by_asc(media::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_media(&self, media_id: Uuid) -> Result<Option<Media>> {
        let result = media::Entity::find_by_id(media_id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn delete_media(&self, media_id: Uuid) -> Result<bool> {
        let result = media::Entity::delete_by_id(media_id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_orphan_media(&self) -> Result<Vec<Media>> {
        let results = media::Entity::find()
            .filter(
                media::Column::StorefrontId.not_in_subquery(
                    Query::select()
                        .column(storefront::Column::Id)
                        .from(storefront::Entity)
                        .to_owned(),
                ),
            )
            .order_by_asc(media::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Establishments =====

pub struct SeaOrmEstablishmentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEstablishmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EstablishmentRepository for SeaOrmEstablishmentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Establishment>> {
        let result = establishment::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_images(&self, establishment_id: Uuid) -> Result<Vec<EstablishmentImage>> {
        let results = establishment_image::Entity::find()
            .filter(establishment_image::Column::EstablishmentId.eq(establishment_id))
            .order_by_asc(establishment_image::Column::SortOrder)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Guests =====

pub struct SeaOrmGuestRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGuestRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GuestRepository for SeaOrmGuestRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GuestGroup>> {
        let results = guest_group::Entity::find()
            .filter(guest_group::Column::UserId.eq(user_id))
            .order_by_asc(guest_group::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn create(&self, group: &GuestGroup) -> Result<GuestGroup> {
        let active: guest_group::ActiveModel = group.into();
        let result = guest_group::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }
}

// ===== Consulted storefronts =====

pub struct SeaOrmConsultationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmConsultationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConsultationRepository for SeaOrmConsultationRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ConsultedStorefront>> {
        let results = consulted_storefront::Entity::find()
            .filter(consulted_storefront::Column::UserId.eq(user_id))
            .order_by_desc(consulted_storefront::Column::ConsultedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConsultedStorefront>> {
        let result = consulted_storefront::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn delete(&self, consultation: &Authorized<ConsultedStorefront>) -> Result<bool> {
        let result = consulted_storefront::Entity::delete_by_id(consultation.id)
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Search history =====

pub struct SeaOrmSearchHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSearchHistoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SearchHistoryRepository for SeaOrmSearchHistoryRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SearchHistoryEntry>> {
        let results = search_history::Entity::find()
            .filter(search_history::Column::UserId.eq(user_id))
            .order_by_desc(search_history::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SearchHistoryEntry>> {
        let result = search_history::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn delete(&self, entry: &Authorized<SearchHistoryEntry>) -> Result<bool> {
        let result = search_history::Entity::delete_by_id(entry.id)
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Photos =====

pub struct SeaOrmPhotoRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPhotoRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PhotoRepository for SeaOrmPhotoRepository {
    async fn list_albums(&self, user_id: Uuid) -> Result<Vec<PhotoAlbum>> {
        let results = photo_album::Entity::find()
            .filter(photo_album::Column::UserId.eq(user_id))
            .order_by_desc(photo_album::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn create_album(&self, album: &PhotoAlbum) -> Result<PhotoAlbum> {
        let active: photo_album::ActiveModel = album.into();
        let result = photo_album::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_photo(&self, id: Uuid) -> Result<Option<UserPhoto>> {
        let result = user_photo::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn delete_photo(&self, photo: &Authorized<UserPhoto>) -> Result<bool> {
        let result = user_photo::Entity::delete_by_id(photo.id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Plans =====

pub struct SeaOrmPlanRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPlanRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for SeaOrmPlanRepository {
    async fn list_active(&self) -> Result<Vec<SubscriptionPlan>> {
        let results = subscription_plan::Entity::find()
            .filter(subscription_plan::Column::IsActive.eq(true))
            .order_by_asc(subscription_plan::Column::PriceCents)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Maintenance =====

pub struct SeaOrmMaintenanceRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMaintenanceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaintenanceRepository for SeaOrmMaintenanceRepository {
    async fn ping(&self) -> Result<()> {
        self.db.ping().await?;
        Ok(())
    }

    async fn table_counts(&self) -> Result<Vec<TableCount>> {
        let db = &*self.db;
        let counts = vec![
            ("users", user::Entity::find().count(db).await?),
            ("partner_storefronts", storefront::Entity::find().count(db).await?),
            ("storefront_media", media::Entity::find().count(db).await?),
            ("establishments", establishment::Entity::find().count(db).await?),
            ("establishment_images", establishment_image::Entity::find().count(db).await?),
            ("guest_groups", guest_group::Entity::find().count(db).await?),
            ("consulted_storefronts", consulted_storefront::Entity::find().count(db).await?),
            ("search_history", search_history::Entity::find().count(db).await?),
            ("photo_albums", photo_album::Entity::find().count(db).await?),
            ("user_photos", user_photo::Entity::find().count(db).await?),
            ("subscription_plans", subscription_plan::Entity::find().count(db).await?),
        ];

        Ok(counts
            .into_iter()
            .map(|(table, rows)| TableCount {
                table: table.to_string(),
                rows,
            })
            .collect())
    }

    async fn reset_all(&self) -> Result<u64> {
        let txn = self.db.begin().await?;

        // Children before parents so foreign keys hold at every step
        let mut deleted = 0;
        deleted += user_photo::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += photo_album::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += search_history::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += consulted_storefront::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += guest_group::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += media::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += storefront::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += establishment_image::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += establishment::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += subscription_plan::Entity::delete_many().exec(&txn).await?.rows_affected;
        deleted += user::Entity::delete_many().exec(&txn).await?.rows_affected;

        txn.commit().await?;
        Ok(deleted)
    }
}
