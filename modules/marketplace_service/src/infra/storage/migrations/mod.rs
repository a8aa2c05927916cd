//! Database migrations for the marketplace service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_accounts::Migration),
            Box::new(m20250301_000002_create_establishments::Migration),
            Box::new(m20250301_000003_create_user_content::Migration),
            Box::new(m20250301_000004_create_subscription_plans::Migration),
        ]
    }
}

async fn create_index<T, C>(manager: &SchemaManager<'_>, name: &str, table: T, col: C) -> Result<(), DbErr>
where
    T: Iden + 'static,
    C: Iden + 'static,
{
    manager
        .create_index(Index::create().name(name).table(table).col(col).to_owned())
        .await
}

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20250301_000001_create_accounts {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_accounts"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::Name).string())
                        .col(ColumnDef::new(Users::Role).string().not_null().default("user"))
                        .col(ColumnDef::new(Users::StripeCustomerId).string())
                        .col(created_at(Users::CreatedAt))
                        .col(created_at(Users::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PartnerStorefronts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PartnerStorefronts::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PartnerStorefronts::PartnerId).uuid().not_null())
                        .col(ColumnDef::new(PartnerStorefronts::EstablishmentId).uuid())
                        .col(ColumnDef::new(PartnerStorefronts::CompanyName).string().not_null())
                        .col(ColumnDef::new(PartnerStorefronts::Description).text())
                        .col(ColumnDef::new(PartnerStorefronts::LogoUrl).string())
                        .col(
                            ColumnDef::new(PartnerStorefronts::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(created_at(PartnerStorefronts::CreatedAt))
                        .col(created_at(PartnerStorefronts::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_storefronts_partner")
                                .from(PartnerStorefronts::Table, PartnerStorefronts::PartnerId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StorefrontMedia::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(StorefrontMedia::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(StorefrontMedia::StorefrontId).uuid().not_null())
                        .col(ColumnDef::new(StorefrontMedia::Url).string().not_null())
                        .col(
                            ColumnDef::new(StorefrontMedia::MediaType)
                                .string()
                                .not_null()
                                .default("image"),
                        )
                        .col(ColumnDef::new(StorefrontMedia::Title).string())
                        .col(ColumnDef::new(StorefrontMedia::Description).text())
                        .col(
                            ColumnDef::new(StorefrontMedia::SortOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(created_at(StorefrontMedia::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_storefronts_partner_id")
                        .table(PartnerStorefronts::Table)
                        .col(PartnerStorefronts::PartnerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_storefront_media_storefront_id")
                        .table(StorefrontMedia::Table)
                        .col(StorefrontMedia::StorefrontId)
                        .col(StorefrontMedia::SortOrder)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StorefrontMedia::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PartnerStorefronts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Email,
        Name,
        Role,
        StripeCustomerId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PartnerStorefronts {
        Table,
        Id,
        PartnerId,
        EstablishmentId,
        CompanyName,
        Description,
        LogoUrl,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum StorefrontMedia {
        Table,
        Id,
        StorefrontId,
        Url,
        MediaType,
        Title,
        Description,
        SortOrder,
        CreatedAt,
    }
}

mod m20250301_000002_create_establishments {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_establishments"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Establishments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Establishments::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Establishments::Name).string().not_null())
                        .col(ColumnDef::new(Establishments::Description).text())
                        .col(ColumnDef::new(Establishments::City).string())
                        .col(ColumnDef::new(Establishments::MaxCapacity).integer())
                        .col(created_at(Establishments::CreatedAt))
                        .col(created_at(Establishments::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(EstablishmentImages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(EstablishmentImages::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(EstablishmentImages::EstablishmentId).uuid().not_null())
                        .col(ColumnDef::new(EstablishmentImages::Url).string().not_null())
                        .col(ColumnDef::new(EstablishmentImages::Caption).string())
                        .col(
                            ColumnDef::new(EstablishmentImages::SortOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_establishment_images_establishment")
                                .from(EstablishmentImages::Table, EstablishmentImages::EstablishmentId)
                                .to(Establishments::Table, Establishments::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(EstablishmentImages::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Establishments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Establishments {
        Table,
        Id,
        Name,
        Description,
        City,
        MaxCapacity,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum EstablishmentImages {
        Table,
        Id,
        EstablishmentId,
        Url,
        Caption,
        SortOrder,
    }
}

mod m20250301_000003_create_user_content {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_user_content"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GuestGroups::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(GuestGroups::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(GuestGroups::UserId).uuid().not_null())
                        .col(ColumnDef::new(GuestGroups::Name).string().not_null())
                        .col(
                            ColumnDef::new(GuestGroups::GroupType)
                                .string()
                                .not_null()
                                .default("single"),
                        )
                        .col(ColumnDef::new(GuestGroups::Count).integer().not_null().default(1))
                        .col(ColumnDef::new(GuestGroups::Email).string())
                        .col(ColumnDef::new(GuestGroups::Phone).string())
                        .col(
                            ColumnDef::new(GuestGroups::Confirmed)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(GuestGroups::Notes).text())
                        .col(created_at(GuestGroups::CreatedAt))
                        .col(created_at(GuestGroups::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ConsultedStorefronts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ConsultedStorefronts::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ConsultedStorefronts::UserId).uuid().not_null())
                        .col(ColumnDef::new(ConsultedStorefronts::StorefrontId).uuid().not_null())
                        .col(created_at(ConsultedStorefronts::ConsultedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SearchHistory::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(SearchHistory::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(SearchHistory::UserId).uuid().not_null())
                        .col(ColumnDef::new(SearchHistory::Query).string().not_null())
                        .col(ColumnDef::new(SearchHistory::Filters).json())
                        .col(created_at(SearchHistory::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PhotoAlbums::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(PhotoAlbums::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(PhotoAlbums::UserId).uuid().not_null())
                        .col(ColumnDef::new(PhotoAlbums::Name).string().not_null())
                        .col(ColumnDef::new(PhotoAlbums::Description).text())
                        .col(created_at(PhotoAlbums::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserPhotos::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(UserPhotos::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(UserPhotos::UserId).uuid().not_null())
                        .col(ColumnDef::new(UserPhotos::AlbumId).uuid())
                        .col(ColumnDef::new(UserPhotos::Url).string().not_null())
                        .col(ColumnDef::new(UserPhotos::Caption).string())
                        .col(ColumnDef::new(UserPhotos::SortOrder).integer().not_null().default(0))
                        .col(created_at(UserPhotos::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_user_photos_album")
                                .from(UserPhotos::Table, UserPhotos::AlbumId)
                                .to(PhotoAlbums::Table, PhotoAlbums::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            create_index(manager, "idx_guest_groups_user_id", GuestGroups::Table, GuestGroups::UserId).await?;
            create_index(
                manager,
                "idx_consulted_storefronts_user_id",
                ConsultedStorefronts::Table,
                ConsultedStorefronts::UserId,
            )
            .await?;
            create_index(manager, "idx_search_history_user_id", SearchHistory::Table, SearchHistory::UserId).await?;
            create_index(manager, "idx_photo_albums_user_id", PhotoAlbums::Table, PhotoAlbums::UserId).await?;
            create_index(manager, "idx_user_photos_user_id", UserPhotos::Table, UserPhotos::UserId).await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserPhotos::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PhotoAlbums::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SearchHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ConsultedStorefronts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GuestGroups::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum GuestGroups {
        Table,
        Id,
        UserId,
        Name,
        GroupType,
        Count,
        Email,
        Phone,
        Confirmed,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ConsultedStorefronts {
        Table,
        Id,
        UserId,
        StorefrontId,
        ConsultedAt,
    }

    #[derive(DeriveIden)]
    enum SearchHistory {
        Table,
        Id,
        UserId,
        Query,
        Filters,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum PhotoAlbums {
        Table,
        Id,
        UserId,
        Name,
        Description,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum UserPhotos {
        Table,
        Id,
        UserId,
        AlbumId,
        Url,
        Caption,
        SortOrder,
        CreatedAt,
    }
}

mod m20250301_000004_create_subscription_plans {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_subscription_plans"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SubscriptionPlans::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SubscriptionPlans::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SubscriptionPlans::Name).string().not_null())
                        .col(ColumnDef::new(SubscriptionPlans::Description).text())
                        .col(ColumnDef::new(SubscriptionPlans::PriceCents).big_integer().not_null())
                        .col(
                            ColumnDef::new(SubscriptionPlans::Currency)
                                .string()
                                .not_null()
                                .default("eur"),
                        )
                        .col(
                            ColumnDef::new(SubscriptionPlans::BillingInterval)
                                .string()
                                .not_null()
                                .default("month"),
                        )
                        .col(ColumnDef::new(SubscriptionPlans::Features).json().not_null())
                        .col(
                            ColumnDef::new(SubscriptionPlans::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(SubscriptionPlans::StripePriceId).string())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SubscriptionPlans::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SubscriptionPlans {
        Table,
        Id,
        Name,
        Description,
        PriceCents,
        Currency,
        BillingInterval,
        Features,
        IsActive,
        StripePriceId,
    }
}
