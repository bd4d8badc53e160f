//! Create `category` table.
//! Categories form a tree through the nullable self-reference `parent_id`.
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
                        .table(Category::Table)
                        .if_not_exists()
                        .col(uuid(Category::Id).primary_key())
                        .col(string_len(Category::Name, 100).not_null())
                        .col(string_len_null(Category::Description, 500))
                        .col(uuid_null(Category::ParentId))
                        .col(integer(Category::DisplayOrder).not_null().default(0)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_category_parent")
                        .from(Category::Table, Category::ParentId)
                        .to(Category::Table, Category::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    Name,
    Description,
    ParentId,
    DisplayOrder,
}
