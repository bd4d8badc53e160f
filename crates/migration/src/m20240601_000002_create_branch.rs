//! Create `branch` table (product brands).
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
                        .table(Branch::Table)
                        .if_not_exists()
                        .col(uuid(Branch::Id).primary_key())
                        .col(string_len(Branch::BranchName, 255).not_null())
                        .col(string_len_null(Branch::Description, 1000))
                        .col(string_len_null(Branch::LogoUrl, 512))
                        .col(string_len_null(Branch::WebsiteUrl, 512)),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Branch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Branch {
    Table,
    Id,
    BranchName,
    Description,
    LogoUrl,
    WebsiteUrl,
}
