//! Create `inventory` table.
//! One inventory row per variant; `available_quantity` is maintained by the application.
use sea_orm_migration::{prelude::*, schema::*};

use crate::audit::audit_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                audit_columns(
                    Table::create()
                        .table(Inventory::Table)
                        .if_not_exists()
                        .col(uuid(Inventory::Id).primary_key())
                        .col(uuid_uniq(Inventory::ProductVariantId))
                        .col(integer(Inventory::Quantity).not_null())
                        .col(integer(Inventory::ReservedQuantity).not_null().default(0))
                        .col(integer(Inventory::AvailableQuantity).not_null())
                        .col(integer_null(Inventory::MinStockLevel))
                        .col(integer_null(Inventory::MaxStockLevel))
                        .col(timestamp_with_time_zone_null(Inventory::LastRestockDate)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_inventory_product_variant")
                        .from(Inventory::Table, Inventory::ProductVariantId)
                        .to(ProductVariant::Table, ProductVariant::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Inventory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    ProductVariantId,
    Quantity,
    ReservedQuantity,
    AvailableQuantity,
    MinStockLevel,
    MaxStockLevel,
    LastRestockDate,
}

#[derive(DeriveIden)]
enum ProductVariant { Table, Id }
