//! Lookup indexes for the catalog.
//! Category name lookups go through `lower(name)`: a btree for equality and a
//! trigram GIN index for substring search.
//! `lower()` follows the database `LC_CTYPE`; create the database with a UTF-8
//! locale (e.g. `en_US.UTF-8`) so Vietnamese names fold case.
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pg_trgm").await?;
        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_category_name_lower ON category (lower(name))",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_category_name_trgm ON category USING gin (lower(name) gin_trgm_ops)",
        )
        .await?;

        // Category: partial scans over active rows
        manager
            .create_index(
                Index::create()
                    .name("idx_category_active")
                    .table(Category::Table)
                    .col(Category::IsActive)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_category_parent")
                    .table(Category::Table)
                    .col(Category::ParentId)
                    .to_owned(),
            )
            .await?;

        // Products: by category and brand
        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_products_brand")
                    .table(Products::Table)
                    .col(Products::BrandId)
                    .to_owned(),
            )
            .await?;

        // Variants and images: by owning row
        manager
            .create_index(
                Index::create()
                    .name("idx_product_variant_product")
                    .table(ProductVariant::Table)
                    .col(ProductVariant::ProductId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_image_variant")
                    .table(ProductImage::Table)
                    .col(ProductImage::ProductVariantId)
                    .col(ProductImage::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_category_name_trgm").await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_category_name_lower").await?;
        manager
            .drop_index(Index::drop().name("idx_category_active").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_category_parent").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_category").table(Products::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_brand").table(Products::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_variant_product").table(ProductVariant::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_image_variant").table(ProductImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Category { Table, IsActive, ParentId }

#[derive(DeriveIden)]
enum Products { Table, CategoryId, BrandId }

#[derive(DeriveIden)]
enum ProductVariant { Table, ProductId }

#[derive(DeriveIden)]
enum ProductImage { Table, ProductVariantId, DisplayOrder }
