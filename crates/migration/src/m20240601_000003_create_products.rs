//! Create `products` table.
//! Every product belongs to one category and one brand.
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
                        .table(Products::Table)
                        .if_not_exists()
                        .col(uuid(Products::Id).primary_key())
                        .col(string_len(Products::Name, 255).not_null())
                        .col(string_len_null(Products::Description, 2000))
                        .col(string_len_null(Products::Unit, 50))
                        .col(uuid(Products::CategoryId).not_null())
                        .col(uuid(Products::BrandId).not_null()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_products_category")
                        .from(Products::Table, Products::CategoryId)
                        .to(Category::Table, Category::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_products_brand")
                        .from(Products::Table, Products::BrandId)
                        .to(Branch::Table, Branch::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Unit,
    CategoryId,
    BrandId,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum Branch { Table, Id }
