//! Audit columns shared by every catalog table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveIden)]
pub enum Audit {
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
    IsActive,
}

/// Append created/updated timestamps, actors and the soft-delete flag.
pub fn audit_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(timestamp_with_time_zone(Audit::CreatedAt).not_null())
        .col(timestamp_with_time_zone(Audit::UpdatedAt).not_null())
        .col(string_len_null(Audit::CreatedBy, 100))
        .col(string_len_null(Audit::UpdatedBy, 100))
        .col(boolean(Audit::IsActive).not_null().default(true))
}
