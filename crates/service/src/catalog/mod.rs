//! Services over the remaining catalog records: brands, products, variants,
//! inventory and images.
//!
//! These are plain functions over a database connection. Every write stamps
//! audit columns with the explicit actor.

pub mod branch;
pub mod product;
pub mod variant;
pub mod inventory;
pub mod image;

use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

use crate::errors::ServiceError;

/// Load a row by primary key or fail with `NotFound`.
pub(crate) async fn require<E, C>(db: &C, entity: &str, id: uuid::Uuid) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<uuid::Uuid>,
    C: ConnectionTrait,
{
    E::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found(entity, id))
}
