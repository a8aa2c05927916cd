//! Integration tests for the marketplace domain service

mod common;

use common::Harness;
use marketplace_service::contract::*;
use uuid::Uuid;

// ===== Guests =====

#[tokio::test]
async fn guest_group_from_numeric_string() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);

    let group = h
        .service
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
    assert_eq!(group.user_id, session.user_id);

    let listed = h.service.list_guest_groups(&session).await.unwrap();
    assert_eq!(listed, vec![group]);
}

#[tokio::test]
async fn guest_group_without_name_is_rejected() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);

    let result = h
        .service
        .create_guest_group(
            &session,
            GuestGroupInput {
                group_type: Some("family".to_string()),
                count: Some(GuestCount::Text("4".to_string())),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(MarketplaceError::Validation { .. })));
    assert_eq!(h.db.guest_count(), 0);
}

#[tokio::test]
async fn guest_groups_are_scoped_to_owner() {
    let h = Harness::new();
    let (alice, _) = h.login("alice@example.com", Role::User);
    let (bob, _) = h.login("bob@example.com", Role::User);

    h.service
        .create_guest_group(
            &alice,
            GuestGroupInput {
                name: Some("Témoins".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(h.service.list_guest_groups(&alice).await.unwrap().len(), 1);
    assert!(h.service.list_guest_groups(&bob).await.unwrap().is_empty());
}

// ===== Ownership-scoped deletes =====

#[tokio::test]
async fn consultation_delete_twice_then_not_found() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    let other = h.db.add_consultation(Uuid::new_v4(), Uuid::new_v4());
    let mine = h.db.add_consultation(session.user_id, Uuid::new_v4());

    h.service
        .delete_consulted_storefront(&session, mine.id)
        .await
        .unwrap();
    let second = h.service.delete_consulted_storefront(&session, mine.id).await;

    assert!(matches!(second, Err(MarketplaceError::NotFound { .. })));
    assert!(h.db.has_consultation(other.id), "unrelated record must survive");
}

#[tokio::test]
async fn foreign_consultation_is_reported_missing() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    let foreign = h.db.add_consultation(Uuid::new_v4(), Uuid::new_v4());

    let result = h.service.delete_consulted_storefront(&session, foreign.id).await;

    assert!(matches!(result, Err(MarketplaceError::NotFound { .. })));
    assert!(h.db.has_consultation(foreign.id));
}

#[tokio::test]
async fn foreign_search_history_is_reported_missing() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    let foreign = h.db.add_search(Uuid::new_v4(), "photographe lyon");
    let mine = h.db.add_search(session.user_id, "traiteur bordeaux");

    let result = h.service.delete_search_history(&session, foreign.id).await;
    assert!(matches!(result, Err(MarketplaceError::NotFound { .. })));
    assert!(h.db.has_search(foreign.id));

    h.service.delete_search_history(&session, mine.id).await.unwrap();
    assert!(!h.db.has_search(mine.id));
}

#[tokio::test]
async fn foreign_photo_is_forbidden_and_kept() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    let photo = h.db.add_photo(Uuid::new_v4());

    let result = h.service.delete_photo(&session, photo.id).await;

    assert!(matches!(result, Err(MarketplaceError::Forbidden { .. })));
    assert!(h.db.has_photo(photo.id));
    assert!(h.blobs.deleted.read().is_empty());
}

#[tokio::test]
async fn photo_record_deleted_even_when_blob_delete_fails() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    let photo = h.db.add_photo(session.user_id);
    h.blobs.set_failing(true);

    h.service.delete_photo(&session, photo.id).await.unwrap();

    assert!(!h.db.has_photo(photo.id));
}

#[tokio::test]
async fn missing_photo_is_not_found() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);

    let result = h.service.delete_photo(&session, Uuid::new_v4()).await;
    assert!(matches!(result, Err(MarketplaceError::NotFound { .. })));
}

// ===== Partner media =====

#[tokio::test]
async fn partner_deletes_own_media_and_blob() {
    let h = Harness::new();
    let (partner, _) = h.login("venue@example.com", Role::Partner);
    let storefront = h.db.add_storefront(partner.user_id, true);
    let media = h.db.add_media(storefront.id, 0);

    h.service
        .delete_storefront_media(&partner, storefront.id, media.id)
        .await
        .unwrap();

    assert!(!h.db.has_media(media.id));
    assert_eq!(*h.blobs.deleted.read(), vec![media.url.clone()]);
}

#[tokio::test]
async fn media_of_another_storefront_is_not_found() {
    let h = Harness::new();
    let (partner, _) = h.login("venue@example.com", Role::Partner);
    let own = h.db.add_storefront(partner.user_id, true);
    let foreign = h.db.add_storefront(Uuid::new_v4(), true);
    let foreign_media = h.db.add_media(foreign.id, 0);

    // Own storefront, media from elsewhere
    let mixed = h
        .service
        .delete_storefront_media(&partner, own.id, foreign_media.id)
        .await;
    assert!(matches!(mixed, Err(MarketplaceError::NotFound { .. })));

    // Someone else's storefront entirely
    let direct = h.service.delete_media(&partner, foreign_media.id).await;
    assert!(matches!(direct, Err(MarketplaceError::NotFound { .. })));

    assert!(h.db.has_media(foreign_media.id));
}

// ===== Public profiles =====

#[tokio::test]
async fn storefront_media_sorted_by_order() {
    let h = Harness::new();
    let storefront = h.db.add_storefront(Uuid::new_v4(), true);
    for order in [3, 1, 2, 1] {
        h.db.add_media(storefront.id, order);
    }

    let profile = h.service.get_storefront(storefront.id).await.unwrap();
    let orders: Vec<i32> = profile.media.iter().map(|m| m.sort_order).collect();
    assert_eq!(orders, vec![1, 1, 2, 3]);
}

#[tokio::test]
async fn inactive_storefront_is_hidden() {
    let h = Harness::new();
    let storefront = h.db.add_storefront(Uuid::new_v4(), false);

    let result = h.service.get_storefront(storefront.id).await;
    assert!(matches!(result, Err(MarketplaceError::NotFound { .. })));
}

#[tokio::test]
async fn establishment_images_sorted_by_order() {
    let h = Harness::new();
    let establishment = h.db.add_establishment(&[5, 0, 2]);

    let profile = h.service.get_establishment(establishment.id).await.unwrap();
    let orders: Vec<i32> = profile.images.iter().map(|i| i.sort_order).collect();
    assert_eq!(orders, vec![0, 2, 5]);
}

// ===== Billing =====

#[tokio::test]
async fn customer_is_created_once() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);

    let first = h.service.create_customer(&session).await.unwrap();
    let second = h.service.create_customer(&session).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.customer_id, second.customer_id);
    assert_eq!(h.payments.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(
        h.db.user(session.user_id).unwrap().stripe_customer_id,
        Some(first.customer_id)
    );
}

#[tokio::test]
async fn plans_listed_active_and_cheapest_first() {
    let h = Harness::new();
    h.db.add_plan("Premium", 9900, true);
    h.db.add_plan("Essentiel", 2900, true);
    h.db.add_plan("Legacy", 100, false);

    let plans = h.service.list_subscription_plans().await.unwrap();
    let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Essentiel", "Premium"]);
}

// ===== Sessions =====

#[tokio::test]
async fn unknown_token_yields_no_session() {
    let h = Harness::new();
    let (session, token) = h.login("claire@example.com", Role::User);

    assert_eq!(h.service.get_session(Some(&token)), Some(session));
    assert_eq!(h.service.get_session(Some("forged")), None);
    assert_eq!(h.service.get_session(None), None);
}

#[tokio::test]
async fn repository_failure_is_internal() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    h.db.set_offline(true);

    let result = h.service.list_guest_groups(&session).await;
    assert_eq!(result, Err(MarketplaceError::Internal));
}

// ===== Test utilities and maintenance =====

#[tokio::test]
async fn test_partner_has_active_storefront() {
    let h = Harness::new();

    let partner = h
        .service
        .create_test_partner(TestPartnerInput {
            email: Some("Venue@Example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(partner.user.role, Role::Partner);
    assert_eq!(partner.user.email, "venue@example.com");
    assert_eq!(partner.storefront.partner_id, partner.user.id);
    assert!(partner.storefront.is_active);

    let duplicate = h
        .service
        .create_test_partner(TestPartnerInput {
            email: Some("venue@example.com".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(duplicate, Err(MarketplaceError::Validation { .. })));
}

#[tokio::test]
async fn reset_then_status_reports_empty_tables() {
    let h = Harness::new();
    let (session, _) = h.login("claire@example.com", Role::User);
    h.db.add_photo(session.user_id);
    h.db.add_plan("Premium", 9900, true);

    let deleted = h.service.reset_database().await.unwrap();
    assert_eq!(deleted, 3);

    let status = h.service.database_status().await.unwrap();
    assert!(status.connected);
    assert!(status.tables.iter().all(|t| t.rows == 0));
    assert_eq!(h.db.total_rows(), 0);
}

#[tokio::test]
async fn status_reports_disconnected_database() {
    let h = Harness::new();
    h.db.set_offline(true);

    let status = h.service.database_status().await.unwrap();
    assert!(!status.connected);
}

#[tokio::test]
async fn orphan_cleanup_reports_each_item() {
    let h = Harness::new();
    let live = h.db.add_storefront(Uuid::new_v4(), true);
    let gone = h.db.add_storefront(Uuid::new_v4(), true);
    let kept = h.db.add_media(live.id, 0);
    let orphan_a = h.db.add_media(gone.id, 0);
    let orphan_b = h.db.add_media(gone.id, 1);
    h.db.remove_storefront(gone.id);

    let report = h.service.cleanup_orphan_media().await.unwrap();

    assert!(report.is_clean());
    assert_eq!(report.total(), 2);
    assert!(report.succeeded.contains(&orphan_a.id));
    assert!(report.succeeded.contains(&orphan_b.id));
    assert!(h.db.has_media(kept.id));
}

#[tokio::test]
async fn orphan_cleanup_collects_blob_failures() {
    let h = Harness::new();
    let gone = h.db.add_storefront(Uuid::new_v4(), true);
    let orphan = h.db.add_media(gone.id, 0);
    h.db.remove_storefront(gone.id);
    h.blobs.set_failing(true);

    let report = h.service.cleanup_orphan_media().await.unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, orphan.id);
    assert!(h.db.has_media(orphan.id), "record kept so the cleanup can be retried");
}

#[tokio::test]
async fn purge_deletes_prefix_and_rows() {
    let h = Harness::new();
    let storefront = h.db.add_storefront(Uuid::new_v4(), true);
    let a = h.db.add_media(storefront.id, 0);
    let b = h.db.add_media(storefront.id, 1);

    let report = h.service.purge_storefront_media(storefront.id).await.unwrap();

    assert_eq!(report.succeeded.len(), 2);
    assert!(!h.db.has_media(a.id) && !h.db.has_media(b.id));
    assert_eq!(
        *h.blobs.deleted_prefixes.read(),
        vec![format!("storefronts/{}/", storefront.id)]
    );
}

#[tokio::test]
async fn inspect_user_lists_storefronts() {
    let h = Harness::new();
    let (partner, _) = h.login("venue@example.com", Role::Partner);
    let storefront = h.db.add_storefront(partner.user_id, true);

    let inspection = h.service.inspect_user(" Venue@example.com ").await.unwrap();
    assert_eq!(inspection.user.id, partner.user_id);
    assert_eq!(inspection.storefront_ids, vec![storefront.id]);

    let missing = h.service.inspect_user("nobody@example.com").await;
    assert!(matches!(missing, Err(MarketplaceError::NotFound { .. })));
}
