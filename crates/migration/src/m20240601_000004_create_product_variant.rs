//! Create `product_variant` table.
//! SKU is unique across the catalog.
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
                        .table(ProductVariant::Table)
                        .if_not_exists()
                        .col(uuid(ProductVariant::Id).primary_key())
                        .col(uuid(ProductVariant::ProductId).not_null())
                        .col(string_len_null(ProductVariant::Size, 50))
                        .col(string_len_null(ProductVariant::Color, 50))
                        .col(decimal_len(ProductVariant::Price, 10, 2).not_null())
                        .col(string_len_uniq(ProductVariant::Sku, 64))
                        .col(decimal_len_null(ProductVariant::Weight, 8, 3))
                        .col(string_len_null(ProductVariant::Dimensions, 100)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_product_variant_product")
                        .from(ProductVariant::Table, ProductVariant::ProductId)
                        .to(Products::Table, Products::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductVariant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductVariant {
    Table,
    Id,
    ProductId,
    Size,
    Color,
    Price,
    Sku,
    Weight,
    Dimensions,
}

#[derive(DeriveIden)]
enum Products { Table, Id }
