//! Create `product_image` table.
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
                        .table(ProductImage::Table)
                        .if_not_exists()
                        .col(uuid(ProductImage::Id).primary_key())
                        .col(uuid(ProductImage::ProductVariantId).not_null())
                        .col(string_len(ProductImage::ImageUrl, 1024).not_null())
                        .col(string_len_null(ProductImage::AltText, 255))
                        .col(boolean(ProductImage::IsPrimary).not_null().default(false))
                        .col(integer(ProductImage::DisplayOrder).not_null().default(0))
                        .col(string_len_null(ProductImage::ImageType, 32))
                        .col(big_integer_null(ProductImage::FileSize))
                        .col(integer_null(ProductImage::Width))
                        .col(integer_null(ProductImage::Height)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_product_image_product_variant")
                        .from(ProductImage::Table, ProductImage::ProductVariantId)
                        .to(ProductVariant::Table, ProductVariant::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductImage {
    Table,
    Id,
    ProductVariantId,
    ImageUrl,
    AltText,
    IsPrimary,
    DisplayOrder,
    ImageType,
    FileSize,
    Width,
    Height,
}

#[derive(DeriveIden)]
enum ProductVariant { Table, Id }
