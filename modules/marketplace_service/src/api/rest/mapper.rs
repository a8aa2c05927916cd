//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract;

// ===== Users =====

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
            stripe_customer_id: user.stripe_customer_id,
            created_at: user.created_at,
        }
    }
}

// ===== Guests =====

impl From<contract::GuestGroup> for GuestGroupDto {
    fn from(group: contract::GuestGroup) -> Self {
        Self {
            id: group.id,
            user_id: group.user_id,
            name: group.name,
            group_type: group.group_type.as_str().to_string(),
            count: group.count,
            email: group.email,
            phone: group.phone,
            confirmed: group.confirmed,
            notes: group.notes,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

impl From<CountValue> for contract::GuestCount {
    fn from(value: CountValue) -> Self {
        match value {
            CountValue::Number(n) => contract::GuestCount::Number(n),
            CountValue::Text(s) => contract::GuestCount::Text(s),
        }
    }
}

impl From<CreateGuestGroupRequest> for contract::GuestGroupInput {
    fn from(req: CreateGuestGroupRequest) -> Self {
        Self {
            name: req.name,
            group_type: req.group_type,
            count: req.count.map(Into::into),
            email: req.email,
            phone: req.phone,
            notes: req.notes,
        }
    }
}

// ===== Storefronts =====

impl From<contract::Media> for MediaDto {
    fn from(media: contract::Media) -> Self {
        Self {
            id: media.id,
            storefront_id: media.storefront_id,
            url: media.url,
            media_type: media.media_type.as_str().to_string(),
            title: media.title,
            description: media.description,
            order: media.sort_order,
            created_at: media.created_at,
        }
    }
}

impl From<contract::Storefront> for StorefrontDto {
    fn from(s: contract::Storefront) -> Self {
        Self {
            id: s.id,
            partner_id: s.partner_id,
            establishment_id: s.establishment_id,
            company_name: s.company_name,
            description: s.description,
            logo_url: s.logo_url,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
            media: Vec::new(),
        }
    }
}

impl From<contract::StorefrontProfile> for StorefrontDto {
    fn from(profile: contract::StorefrontProfile) -> Self {
        let mut dto = StorefrontDto::from(profile.storefront);
        dto.media = profile.media.into_iter().map(Into::into).collect();
        dto
    }
}

// ===== Establishments =====

impl From<contract::EstablishmentProfile> for EstablishmentDto {
    fn from(profile: contract::EstablishmentProfile) -> Self {
        let e = profile.establishment;
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            city: e.city,
            max_capacity: e.max_capacity,
            created_at: e.created_at,
            updated_at: e.updated_at,
            images: profile
                .images
                .into_iter()
                .map(|image| EstablishmentImageDto {
                    id: image.id,
                    url: image.url,
                    caption: image.caption,
                    order: image.sort_order,
                })
                .collect(),
        }
    }
}

// ===== History =====

impl From<contract::ConsultedStorefront> for ConsultedStorefrontDto {
    fn from(c: contract::ConsultedStorefront) -> Self {
        Self {
            id: c.id,
            storefront_id: c.storefront_id,
            consulted_at: c.consulted_at,
        }
    }
}

impl From<contract::SearchHistoryEntry> for SearchHistoryDto {
    fn from(entry: contract::SearchHistoryEntry) -> Self {
        Self {
            id: entry.id,
            query: entry.query,
            filters: entry.filters,
            created_at: entry.created_at,
        }
    }
}

// ===== Billing =====

impl From<contract::CustomerLink> for CustomerDto {
    fn from(link: contract::CustomerLink) -> Self {
        Self {
            customer_id: link.customer_id,
            created: link.created,
        }
    }
}

impl From<contract::SubscriptionPlan> for SubscriptionPlanDto {
    fn from(plan: contract::SubscriptionPlan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            price: plan.price_cents,
            currency: plan.currency,
            interval: plan.billing_interval,
            features: plan.features,
            stripe_price_id: plan.stripe_price_id,
        }
    }
}

// ===== Photos =====

impl From<contract::PhotoAlbum> for AlbumDto {
    fn from(album: contract::PhotoAlbum) -> Self {
        Self {
            id: album.id,
            user_id: album.user_id,
            name: album.name,
            description: album.description,
            created_at: album.created_at,
        }
    }
}

impl From<CreateAlbumRequest> for contract::AlbumInput {
    fn from(req: CreateAlbumRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

// ===== Test utilities =====

impl From<CreateTestPartnerRequest> for contract::TestPartnerInput {
    fn from(req: CreateTestPartnerRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            company_name: req.company_name,
        }
    }
}

impl From<contract::TestPartner> for TestPartnerDto {
    fn from(partner: contract::TestPartner) -> Self {
        Self {
            user: partner.user.into(),
            storefront: partner.storefront.into(),
        }
    }
}

impl From<contract::DatabaseStatus> for DatabaseStatusDto {
    fn from(status: contract::DatabaseStatus) -> Self {
        Self {
            connected: status.connected,
            tables: status
                .tables
                .into_iter()
                .map(|t| TableCountDto {
                    table: t.table,
                    rows: t.rows,
                })
                .collect(),
        }
    }
}
