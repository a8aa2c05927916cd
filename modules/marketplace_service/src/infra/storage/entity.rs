//! SeaORM entities for database tables

/// Account table
pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub email: String,
        pub name: Option<String>,
        /// user, partner or admin
        pub role: String,
        pub stripe_customer_id: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::storefront::Entity")]
        Storefronts,
    }

    impl Related<super::storefront::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Storefronts.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Partner storefront table
pub mod storefront {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "partner_storefronts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub partner_id: Uuid,
        pub establishment_id: Option<Uuid>,
        pub company_name: String,
        pub description: Option<String>,
        pub logo_url: Option<String>,
        pub is_active: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::PartnerId",
            to = "super::user::Column::Id"
        )]
        Partner,
        #[sea_orm(has_many = "super::media::Entity")]
        Media,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Partner.def()
        }
    }

    impl Related<super::media::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Media.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Storefront media table
///
/// No foreign key on `storefront_id`: rows may outlive their storefront
/// until the orphan cleanup runs.
pub mod media {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "storefront_media")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub storefront_id: Uuid,
        pub url: String,
        /// image or video
        pub media_type: String,
        pub title: Option<String>,
        pub description: Option<String>,
        pub sort_order: i32,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::storefront::Entity",
            from = "Column::StorefrontId",
            to = "super::storefront::Column::Id"
        )]
        Storefront,
    }

    impl Related<super::storefront::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Storefront.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Venue table
pub mod establishment {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "establishments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub city: Option<String>,
        pub max_capacity: Option<i32>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::establishment_image::Entity")]
        Images,
    }

    impl Related<super::establishment_image::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Images.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod establishment_image {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "establishment_images")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub establishment_id: Uuid,
        pub url: String,
        pub caption: Option<String>,
        pub sort_order: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::establishment::Entity",
            from = "Column::EstablishmentId",
            to = "super::establishment::Column::Id"
        )]
        Establishment,
    }

    impl Related<super::establishment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Establishment.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Guest list table
pub mod guest_group {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "guest_groups")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub name: String,
        pub group_type: String,
        pub count: i32,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub confirmed: bool,
        pub notes: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod consulted_storefront {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "consulted_storefronts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub storefront_id: Uuid,
        pub consulted_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod search_history {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "search_history")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub query: String,
        pub filters: Option<Json>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod photo_album {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "photo_albums")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod user_photo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "user_photos")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub album_id: Option<Uuid>,
        pub url: String,
        pub caption: Option<String>,
        pub sort_order: i32,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Billing plans mirrored from the payment provider
pub mod subscription_plan {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "subscription_plans")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub price_cents: i64,
        pub currency: String,
        pub billing_interval: String,
        /// JSON array of feature strings
        pub features: Json,
        pub is_active: bool,
        pub stripe_price_id: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
