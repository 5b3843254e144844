use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const CATEGORIES: [Category; 6] = [
    Category::Unknown,
    Category::Cloths,
    Category::Food,
    Category::Housewares,
    Category::Automotive,
    Category::Tools,
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Category::Enum)
                    .values(CATEGORIES)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_len(Products::Name, 100))
                    .col(string_len(Products::Description, 250).default(""))
                    .col(decimal_len(Products::Price, 14, 2))
                    .col(boolean(Products::Available).default(true))
                    .col(
                        ColumnDef::new(Products::Category)
                            .enumeration(Category::Enum, CATEGORIES)
                            .not_null()
                            .default("UNKNOWN"),
                    )
                    .to_owned(),
            )
            .await?;

        // List filters look products up by name and category
        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Category::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    Available,
    Category,
}

#[derive(DeriveIden, Clone, Copy)]
enum Category {
    #[sea_orm(iden = "category")]
    Enum,
    #[sea_orm(iden = "UNKNOWN")]
    Unknown,
    #[sea_orm(iden = "CLOTHS")]
    Cloths,
    #[sea_orm(iden = "FOOD")]
    Food,
    #[sea_orm(iden = "HOUSEWARES")]
    Housewares,
    #[sea_orm(iden = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(iden = "TOOLS")]
    Tools,
}
