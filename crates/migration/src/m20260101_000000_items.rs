//! Initial schema migration for Pantagon.
//!
//! - `items`: tracked physical objects with purchase and optional sale data.
//!
//! Dates are stored as `YYYY-MM-DD` text and amounts as integer minor units.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Items {
    Table,
    Id,
    Name,
    PurchasePrice,
    ExtraCost,
    PurchaseDate,
    SaleDate,
    SalePrice,
    Status,
    GroupName,
    Category,
    DailyBurn,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(
                        ColumnDef::new(Items::PurchasePrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::ExtraCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Items::PurchaseDate).string().not_null())
                    .col(ColumnDef::new(Items::SaleDate).string())
                    .col(ColumnDef::new(Items::SalePrice).big_integer())
                    .col(
                        ColumnDef::new(Items::Status)
                            .string()
                            .not_null()
                            .default("owned"),
                    )
                    .col(ColumnDef::new(Items::GroupName).string())
                    .col(ColumnDef::new(Items::Category).string())
                    .col(
                        ColumnDef::new(Items::DailyBurn)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-items-purchase_date")
                    .table(Items::Table)
                    .col(Items::PurchaseDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        Ok(())
    }
}
