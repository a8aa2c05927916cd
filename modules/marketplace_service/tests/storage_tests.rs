//! Integration tests against a real SQLite database

use chrono::{Duration, Utc};
use marketplace_service::contract::*;
use marketplace_service::infra::storage::entity::{consulted_storefront, media, user_photo};
use marketplace_service::infra::storage::{build_repositories, DbHandle};
use marketplace_service::{Config, MarketplaceModule};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::collections::HashSet;
use tempfile::TempDir;
use uuid::Uuid;

struct Fixture {
    _dir: TempDir,
    db: DbHandle,
    module: MarketplaceModule,
}

async fn migrated() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("marketplace.db").display());
    let db = DbHandle::open(&url).await.unwrap();
    let module = MarketplaceModule::with_db(Config::default(), db.clone()).unwrap();
    module.migrate().await.unwrap();
    Fixture { _dir: dir, db, module }
}

async fn add_user(f: &Fixture, email: &str, role: Role) -> Session {
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
    let user = build_repositories(&f.db).users.create(&user).await.unwrap();
    Session {
        user_id: user.id,
        email: user.email,
        role,
    }
}

async fn add_media(f: &Fixture, storefront_id: Uuid, sort_order: i32) -> Uuid {
    let id = Uuid::new_v4();
    media::ActiveModel {
        id: Set(id),
        storefront_id: Set(storefront_id),
        url: Set(format!("https://blob.example.com/storefronts/{storefront_id}/{id}.jpg")),
        media_type: Set("image".to_string()),
        title: Set(None),
        description: Set(None),
        sort_order: Set(sort_order),
        created_at: Set(Utc::now() - Duration::seconds(i64::from(sort_order))),
    }
    .insert(&*f.db.conn())
    .await
    .unwrap();
    id
}

async fn add_photo(f: &Fixture, user_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    user_photo::ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        album_id: Set(None),
        url: Set(format!("https://blob.example.com/photos/{id}.jpg")),
        caption: Set(None),
        sort_order: Set(0),
        created_at: Set(Utc::now()),
    }
    .insert(&*f.db.conn())
    .await
    .unwrap();
    id
}

#[tokio::test]
async fn every_migration_is_recorded_under_its_own_name() {
    let f = migrated().await;

    let states = f.module.check_migrations().await.unwrap();
    assert_eq!(states.len(), 4);
    assert!(states.iter().all(|s| s.applied));
    let names: HashSet<&str> = states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), 4);

    // Second run has nothing to apply
    f.module.migrate().await.unwrap();
    assert_eq!(f.module.check_migrations().await.unwrap().len(), 4);
}

#[tokio::test]
async fn guests_and_albums_through_native_client() {
    let f = migrated().await;
    let client = f.module.client();
    let session = add_user(&f, "claire@example.com", Role::User).await;

    let group = client
        .create_guest_group(
            &session,
            GuestGroupInput {
                name: Some("Famille Dupont".to_string()),
                group_type: Some("family".to_string()),
                count: Some(GuestCount::Text("4".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(group.count, 4);
    assert!(!group.confirmed);
    assert_eq!(group.group_type, GuestType::Family);

    let listed = client.list_guest_groups(&session).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, group.id);
    assert_eq!(listed[0].name, "Famille Dupont");

    client
        .create_album(
            &session,
            AlbumInput {
                name: Some("Cérémonie".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    let albums = client.list_albums(&session).await.unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].name, "Cérémonie");

    let user = client.current_user(&session).await.unwrap();
    assert_eq!(user.email, "claire@example.com");
}

#[tokio::test]
async fn photo_delete_checks_owner_then_removes_row() {
    let f = migrated().await;
    let client = f.module.client();
    let owner = add_user(&f, "owner@example.com", Role::User).await;
    let intruder = add_user(&f, "intruder@example.com", Role::User).await;
    let photo = add_photo(&f, owner.user_id).await;

    let err = client.delete_photo(&intruder, photo).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::Forbidden { .. }));
    assert!(user_photo::Entity::find_by_id(photo)
        .one(&*f.db.conn())
        .await
        .unwrap()
        .is_some());

    client.delete_photo(&owner, photo).await.unwrap();
    let err = client.delete_photo(&owner, photo).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));
}

#[tokio::test]
async fn consultation_delete_twice_is_not_found() {
    let f = migrated().await;
    let service = f.module.service();
    let session = add_user(&f, "claire@example.com", Role::User).await;

    let id = Uuid::new_v4();
    consulted_storefront::ActiveModel {
        id: Set(id),
        user_id: Set(session.user_id),
        storefront_id: Set(Uuid::new_v4()),
        consulted_at: Set(Utc::now()),
    }
    .insert(&*f.db.conn())
    .await
    .unwrap();

    assert_eq!(service.list_consulted_storefronts(&session).await.unwrap().len(), 1);
    service.delete_consulted_storefront(&session, id).await.unwrap();
    let err = service.delete_consulted_storefront(&session, id).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));
}

#[tokio::test]
async fn storefront_media_sorted_and_orphans_cleaned() {
    let f = migrated().await;
    let service = f.module.service();
    let partner = service
        .create_test_partner(TestPartnerInput::default())
        .await
        .unwrap();
    let storefront_id = partner.storefront.id;

    add_media(&f, storefront_id, 2).await;
    add_media(&f, storefront_id, 1).await;
    let orphan = add_media(&f, Uuid::new_v4(), 0).await;

    let profile = service.get_storefront(storefront_id).await.unwrap();
    let orders: Vec<i32> = profile.media.iter().map(|m| m.sort_order).collect();
    assert_eq!(orders, vec![1, 2]);

    let report = service.cleanup_orphan_media().await.unwrap();
    assert_eq!(report.succeeded, vec![orphan]);
    assert!(report.failed.is_empty());
    assert!(media::Entity::find_by_id(orphan)
        .one(&*f.db.conn())
        .await
        .unwrap()
        .is_none());
    assert_eq!(service.get_storefront(storefront_id).await.unwrap().media.len(), 2);
}

#[tokio::test]
async fn reset_removes_every_row_in_one_go() {
    let f = migrated().await;
    let service = f.module.service();
    let session = add_user(&f, "claire@example.com", Role::User).await;
    let partner = service
        .create_test_partner(TestPartnerInput::default())
        .await
        .unwrap();
    add_media(&f, partner.storefront.id, 0).await;
    add_photo(&f, session.user_id).await;

    let before = service.database_status().await.unwrap();
    assert!(before.connected);
    let total: u64 = before.tables.iter().map(|t| t.rows).sum();
    assert_eq!(total, 5);

    assert_eq!(service.reset_database().await.unwrap(), 5);

    let after = service.database_status().await.unwrap();
    assert!(after.tables.iter().all(|t| t.rows == 0));
}
