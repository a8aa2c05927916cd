//! Common test utilities: in-memory repositories and fake providers

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use marketplace_service::contract::*;
use marketplace_service::domain::repository::*;
use marketplace_service::domain::{
    Authorized, BlobStore, PaymentProvider, Service, ServiceSettings, SessionResolver,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

// ===== In-memory database =====

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    storefronts: HashMap<Uuid, Storefront>,
    media: HashMap<Uuid, Media>,
    establishments: HashMap<Uuid, Establishment>,
    images: HashMap<Uuid, EstablishmentImage>,
    guests: HashMap<Uuid, GuestGroup>,
    consultations: HashMap<Uuid, ConsultedStorefront>,
    searches: HashMap<Uuid, SearchHistoryEntry>,
    albums: HashMap<Uuid, PhotoAlbum>,
    photos: HashMap<Uuid, UserPhoto>,
    plans: HashMap<Uuid, SubscriptionPlan>,
}

impl Tables {
    fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("users", self.users.len()),
            ("partner_storefronts", self.storefronts.len()),
            ("storefront_media", self.media.len()),
            ("establishments", self.establishments.len()),
            ("establishment_images", self.images.len()),
            ("guest_groups", self.guests.len()),
            ("consulted_storefronts", self.consultations.len()),
            ("search_history", self.searches.len()),
            ("photo_albums", self.albums.len()),
            ("user_photos", self.photos.len()),
            ("subscription_plans", self.plans.len()),
        ]
    }
}

/// One shared in-memory store implementing every repository trait
#[derive(Clone, Default)]
pub struct MockDb {
    tables: Arc<RwLock<Tables>>,
    offline: Arc<AtomicBool>,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            storefronts: Arc::new(self.clone()),
            establishments: Arc::new(self.clone()),
            guests: Arc::new(self.clone()),
            consultations: Arc::new(self.clone()),
            search_history: Arc::new(self.clone()),
            photos: Arc::new(self.clone()),
            plans: Arc::new(self.clone()),
            maintenance: Arc::new(self.clone()),
        }
    }

    /// Make every call fail as if the database were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }

    // ----- seeding -----

    pub fn add_user(&self, email: &str, role: Role) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: None,
            role,
            stripe_customer_id: None,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().users.insert(user.id, user.clone());
        user
    }

    pub fn add_storefront(&self, partner_id: Uuid, is_active: bool) -> Storefront {
        let now = Utc::now();
        let storefront = Storefront {
            id: Uuid::new_v4(),
            partner_id,
            establishment_id: None,
            company_name: "Domaine des Roses".to_string(),
            description: None,
            logo_url: None,
            is_active,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .storefronts
            .insert(storefront.id, storefront.clone());
        storefront
    }

    pub fn remove_storefront(&self, id: Uuid) {
        self.tables.write().storefronts.remove(&id);
    }

    pub fn add_media(&self, storefront_id: Uuid, sort_order: i32) -> Media {
        let media = Media {
            id: Uuid::new_v4(),
            storefront_id,
            url: format!("https://blob.example.com/storefronts/{}/{}.jpg", storefront_id, Uuid::new_v4()),
            media_type: MediaType::Image,
            title: None,
            description: None,
            sort_order,
            created_at: Utc::now(),
        };
        self.tables.write().media.insert(media.id, media.clone());
        media
    }

    pub fn add_establishment(&self, image_orders: &[i32]) -> Establishment {
        let now = Utc::now();
        let establishment = Establishment {
            id: Uuid::new_v4(),
            name: "Château de Lys".to_string(),
            description: None,
            city: Some("Bordeaux".to_string()),
            max_capacity: Some(180),
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.tables.write();
        for order in image_orders {
            let image = EstablishmentImage {
                id: Uuid::new_v4(),
                establishment_id: establishment.id,
                url: format!("https://blob.example.com/establishments/{}.jpg", order),
                caption: None,
                sort_order: *order,
            };
            tables.images.insert(image.id, image);
        }
        tables
            .establishments
            .insert(establishment.id, establishment.clone());
        establishment
    }

    pub fn add_consultation(&self, user_id: Uuid, storefront_id: Uuid) -> ConsultedStorefront {
        let consultation = ConsultedStorefront {
            id: Uuid::new_v4(),
            user_id,
            storefront_id,
            consulted_at: Utc::now(),
        };
        self.tables
            .write()
            .consultations
            .insert(consultation.id, consultation.clone());
        consultation
    }

    pub fn add_search(&self, user_id: Uuid, query: &str) -> SearchHistoryEntry {
        let entry = SearchHistoryEntry {
            id: Uuid::new_v4(),
            user_id,
            query: query.to_string(),
            filters: Some(serde_json::json!({ "city": "Lyon" })),
            created_at: Utc::now(),
        };
        self.tables.write().searches.insert(entry.id, entry.clone());
        entry
    }

    pub fn add_photo(&self, user_id: Uuid) -> UserPhoto {
        let photo = UserPhoto {
            id: Uuid::new_v4(),
            user_id,
            album_id: None,
            url: format!("https://blob.example.com/photos/{}.jpg", Uuid::new_v4()),
            caption: None,
            sort_order: 0,
            created_at: Utc::now(),
        };
        self.tables.write().photos.insert(photo.id, photo.clone());
        photo
    }

    pub fn add_plan(&self, name: &str, price_cents: i64, is_active: bool) -> SubscriptionPlan {
        let plan = SubscriptionPlan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price_cents,
            currency: "eur".to_string(),
            billing_interval: "month".to_string(),
            features: vec!["Listing".to_string()],
            is_active,
            stripe_price_id: None,
        };
        self.tables.write().plans.insert(plan.id, plan.clone());
        plan
    }

    // ----- inspection -----

    pub fn has_photo(&self, id: Uuid) -> bool {
        self.tables.read().photos.contains_key(&id)
    }

    pub fn has_media(&self, id: Uuid) -> bool {
        self.tables.read().media.contains_key(&id)
    }

    pub fn has_consultation(&self, id: Uuid) -> bool {
        self.tables.read().consultations.contains_key(&id)
    }

    pub fn has_search(&self, id: Uuid) -> bool {
        self.tables.read().searches.contains_key(&id)
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.tables.read().users.get(&id).cloned()
    }

    pub fn guest_count(&self) -> usize {
        self.tables.read().guests.len()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.read().counts().iter().map(|(_, n)| n).sum()
    }
}

#[async_trait]
impl UserRepository for MockDb {
    async fn create(&self, user: &User) -> anyhow::Result<User> {
        self.check()?;
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == user.email) {
            anyhow::bail!("duplicate email");
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.check()?;
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.check()?;
        Ok(self.tables.read().users.values().find(|u| u.email == email).cloned())
    }

    async fn set_stripe_customer_id(&self, id: Uuid, customer_id: &str) -> anyhow::Result<()> {
        self.check()?;
        if let Some(user) = self.tables.write().users.get_mut(&id) {
            user.stripe_customer_id = Some(customer_id.to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl StorefrontRepository for MockDb {
    async fn create(&self, storefront: &Storefront) -> anyhow::Result<Storefront> {
        self.check()?;
        self.tables
            .write()
            .storefronts
            .insert(storefront.id, storefront.clone());
        Ok(storefront.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Storefront>> {
        self.check()?;
        Ok(self.tables.read().storefronts.get(&id).cloned())
    }

    async fn find_by_partner(&self, partner_id: Uuid) -> anyhow::Result<Vec<Storefront>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .storefronts
            .values()
            .filter(|s| s.partner_id == partner_id)
            .cloned()
            .collect())
    }

    async fn list_media(&self, storefront_id: Uuid) -> anyhow::Result<Vec<Media>> {
        self.check()?;
        // Unordered on purpose: callers must sort
        Ok(self
            .tables
            .read()
            .media
            .values()
            .filter(|m| m.storefront_id == storefront_id)
            .cloned()
            .collect())
    }

    async fn find_media(&self, media_id: Uuid) -> anyhow::Result<Option<Media>> {
        self.check()?;
        Ok(self.tables.read().media.get(&media_id).cloned())
    }

    async fn delete_media(&self, media_id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.tables.write().media.remove(&media_id).is_some())
    }

    async fn find_orphan_media(&self) -> anyhow::Result<Vec<Media>> {
        self.check()?;
        let tables = self.tables.read();
        Ok(tables
            .media
            .values()
            .filter(|m| !tables.storefronts.contains_key(&m.storefront_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EstablishmentRepository for MockDb {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Establishment>> {
        self.check()?;
        Ok(self.tables.read().establishments.get(&id).cloned())
    }

    async fn list_images(&self, establishment_id: Uuid) -> anyhow::Result<Vec<EstablishmentImage>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .images
            .values()
            .filter(|i| i.establishment_id == establishment_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GuestRepository for MockDb {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<GuestGroup>> {
        self.check()?;
        let mut groups: Vec<_> = self
            .tables
            .read()
            .guests
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.created_at);
        Ok(groups)
    }

    async fn create(&self, group: &GuestGroup) -> anyhow::Result<GuestGroup> {
        self.check()?;
        self.tables.write().guests.insert(group.id, group.clone());
        Ok(group.clone())
    }
}

#[async_trait]
impl ConsultationRepository for MockDb {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<ConsultedStorefront>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .consultations
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ConsultedStorefront>> {
        self.check()?;
        Ok(self.tables.read().consultations.get(&id).cloned())
    }

    async fn delete(&self, consultation: &Authorized<ConsultedStorefront>) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.tables.write().consultations.remove(&consultation.id).is_some())
    }
}

#[async_trait]
impl SearchHistoryRepository for MockDb {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SearchHistoryEntry>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .searches
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<SearchHistoryEntry>> {
        self.check()?;
        Ok(self.tables.read().searches.get(&id).cloned())
    }

    async fn delete(&self, entry: &Authorized<SearchHistoryEntry>) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.tables.write().searches.remove(&entry.id).is_some())
    }
}

#[async_trait]
impl PhotoRepository for MockDb {
    async fn list_albums(&self, user_id: Uuid) -> anyhow::Result<Vec<PhotoAlbum>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .albums
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_album(&self, album: &PhotoAlbum) -> anyhow::Result<PhotoAlbum> {
        self.check()?;
        self.tables.write().albums.insert(album.id, album.clone());
        Ok(album.clone())
    }

    async fn find_photo(&self, id: Uuid) -> anyhow::Result<Option<UserPhoto>> {
        self.check()?;
        Ok(self.tables.read().photos.get(&id).cloned())
    }

    async fn delete_photo(&self, photo: &Authorized<UserPhoto>) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.tables.write().photos.remove(&photo.id).is_some())
    }
}

#[async_trait]
impl PlanRepository for MockDb {
    async fn list_active(&self) -> anyhow::Result<Vec<SubscriptionPlan>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .plans
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MaintenanceRepository for MockDb {
    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }

    async fn table_counts(&self) -> anyhow::Result<Vec<TableCount>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .counts()
            .into_iter()
            .map(|(table, rows)| TableCount {
                table: table.to_string(),
                rows: rows as u64,
            })
            .collect())
    }

    async fn reset_all(&self) -> anyhow::Result<u64> {
        self.check()?;
        let mut tables = self.tables.write();
        let deleted = tables.counts().iter().map(|(_, n)| *n as u64).sum();
        *tables = Tables::default();
        Ok(deleted)
    }
}

// ===== Fake providers =====

/// Records deletes; can be switched to fail
#[derive(Default)]
pub struct FakeBlobStore {
    pub deleted: RwLock<Vec<String>>,
    pub deleted_prefixes: RwLock<Vec<String>>,
    failing: AtomicBool,
}

impl FakeBlobStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn delete(&self, url: &str) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("blob store unavailable");
        }
        self.deleted.write().push(url.to_string());
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> anyhow::Result<usize> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("blob store unavailable");
        }
        self.deleted_prefixes.write().push(prefix.to_string());
        Ok(0)
    }
}

/// Hands out sequential customer ids
#[derive(Default)]
pub struct FakePayments {
    pub calls: AtomicUsize,
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn create_customer(&self, _email: &str, _name: Option<&str>, _user_id: Uuid) -> anyhow::Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("cus_test_{}", n))
    }
}

/// Token table filled by [`Harness::login`]
#[derive(Default)]
pub struct StaticSessions {
    tokens: RwLock<HashMap<String, Session>>,
}

impl SessionResolver for StaticSessions {
    fn resolve(&self, token: &str) -> Option<Session> {
        self.tokens.read().get(token).cloned()
    }
}

// ===== Harness =====

pub struct Harness {
    pub db: MockDb,
    pub blobs: Arc<FakeBlobStore>,
    pub payments: Arc<FakePayments>,
    pub sessions: Arc<StaticSessions>,
    pub service: Arc<Service>,
}

impl Harness {
    pub fn new() -> Self {
        let db = MockDb::new();
        let blobs = Arc::new(FakeBlobStore::default());
        let payments = Arc::new(FakePayments::default());
        let sessions = Arc::new(StaticSessions::default());
        let service = Arc::new(Service::new(
            db.repositories(),
            blobs.clone(),
            payments.clone(),
            sessions.clone(),
            ServiceSettings::default(),
        ));

        Self {
            db,
            blobs,
            payments,
            sessions,
            service,
        }
    }

    /// Create an account and a token that resolves to it
    pub fn login(&self, email: &str, role: Role) -> (Session, String) {
        let user = self.db.add_user(email, role);
        let session = Session {
            user_id: user.id,
            email: user.email,
            role,
        };
        let token = format!("token-{}", user.id);
        self.sessions.tokens.write().insert(token.clone(), session.clone());
        (session, token)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
