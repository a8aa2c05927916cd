//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    consulted_storefront, establishment, establishment_image, guest_group, media, photo_album,
    search_history, storefront, subscription_plan, user, user_photo,
};
use crate::contract::{
    ConsultedStorefront, Establishment, EstablishmentImage, GuestGroup, GuestType, Media,
    MediaType, PhotoAlbum, Role, SearchHistoryEntry, Storefront, SubscriptionPlan, User,
    UserPhoto,
};
use sea_orm::ActiveValue::Set;

// ===== Users =====

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            role: Role::parse(&m.role),
            stripe_customer_id: m.stripe_customer_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&User> for user::ActiveModel {
    fn from(u: &User) -> Self {
        Self {
            id: Set(u.id),
            email: Set(u.email.clone()),
            name: Set(u.name.clone()),
            role: Set(u.role.as_str().to_string()),
            stripe_customer_id: Set(u.stripe_customer_id.clone()),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        }
    }
}

// ===== Storefronts and media =====

impl From<storefront::Model> for Storefront {
    fn from(m: storefront::Model) -> Self {
        Self {
            id: m.id,
            partner_id: m.partner_id,
            establishment_id: m.establishment_id,
            company_name: m.company_name,
            description: m.description,
            logo_url: m.logo_url,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&Storefront> for storefront::ActiveModel {
    fn from(s: &Storefront) -> Self {
        Self {
            id: Set(s.id),
            partner_id: Set(s.partner_id),
            establishment_id: Set(s.establishment_id),
            company_name: Set(s.company_name.clone()),
            description: Set(s.description.clone()),
            logo_url: Set(s.logo_url.clone()),
            is_active: Set(s.is_active),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
        }
    }
}

impl From<media::Model> for Media {
    fn from(m: media::Model) -> Self {
        Self {
            id: m.id,
            storefront_id: m.storefront_id,
            url: m.url,
            media_type: MediaType::parse(&m.media_type),
            title: m.title,
            description: m.description,
            sort_order: m.sort_order,
            created_at: m.created_at,
        }
    }
}

impl From<&Media> for media::ActiveModel {
    fn from(m: &Media) -> Self {
        Self {
            id: Set(m.id),
            storefront_id: Set(m.storefront_id),
            url: Set(m.url.clone()),
            media_type: Set(m.media_type.as_str().to_string()),
            title: Set(m.title.clone()),
            description: Set(m.description.clone()),
            sort_order: Set(m.sort_order),
            created_at: Set(m.created_at),
        }
    }
}

// ===== Establishments =====

impl From<establishment::Model> for Establishment {
    fn from(m: establishment::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            city: m.city,
            max_capacity: m.max_capacity,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<establishment_image::Model> for EstablishmentImage {
    fn from(m: establishment_image::Model) -> Self {
        Self {
            id: m.id,
            establishment_id: m.establishment_id,
            url: m.url,
            caption: m.caption,
            sort_order: m.sort_order,
        }
    }
}

// ===== Guests =====

impl From<guest_group::Model> for GuestGroup {
    fn from(m: guest_group::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            group_type: GuestType::parse(&m.group_type).unwrap_or(GuestType::Single),
            count: m.count,
            email: m.email,
            phone: m.phone,
            confirmed: m.confirmed,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&GuestGroup> for guest_group::ActiveModel {
    fn from(g: &GuestGroup) -> Self {
        Self {
            id: Set(g.id),
            user_id: Set(g.user_id),
            name: Set(g.name.clone()),
            group_type: Set(g.group_type.as_str().to_string()),
            count: Set(g.count),
            email: Set(g.email.clone()),
            phone: Set(g.phone.clone()),
            confirmed: Set(g.confirmed),
            notes: Set(g.notes.clone()),
            created_at: Set(g.created_at),
            updated_at: Set(g.updated_at),
        }
    }
}

// ===== History =====

impl From<consulted_storefront::Model> for ConsultedStorefront {
    fn from(m: consulted_storefront::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            storefront_id: m.storefront_id,
            consulted_at: m.consulted_at,
        }
    }
}

impl From<search_history::Model> for SearchHistoryEntry {
    fn from(m: search_history::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            query: m.query,
            filters: m.filters,
            created_at: m.created_at,
        }
    }
}

// ===== Photos =====

impl From<photo_album::Model> for PhotoAlbum {
    fn from(m: photo_album::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

impl From<&PhotoAlbum> for photo_album::ActiveModel {
    fn from(a: &PhotoAlbum) -> Self {
        Self {
            id: Set(a.id),
            user_id: Set(a.user_id),
            name: Set(a.name.clone()),
            description: Set(a.description.clone()),
            created_at: Set(a.created_at),
        }
    }
}

impl From<user_photo::Model> for UserPhoto {
    fn from(m: user_photo::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            album_id: m.album_id,
            url: m.url,
            caption: m.caption,
            sort_order: m.sort_order,
            created_at: m.created_at,
        }
    }
}

// ===== Plans =====

impl From<subscription_plan::Model> for SubscriptionPlan {
    fn from(m: subscription_plan::Model) -> Self {
        // Non-string entries in the features array are skipped
        let features = match m.features {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price_cents: m.price_cents,
            currency: m.currency,
            billing_interval: m.billing_interval,
            features,
            is_active: m.is_active,
            stripe_price_id: m.stripe_price_id,
        }
    }
}
