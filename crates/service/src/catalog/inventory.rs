use models::audit::{self, Actor, Write};
use models::{inventory, product_variant};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::info;
use uuid::Uuid;

use super::require;
use crate::errors::ServiceError;

/// Partial stock adjustment; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct InventoryAdjustment {
    pub quantity: Option<i32>,
    pub reserved_quantity: Option<i32>,
    pub min_stock_level: Option<i32>,
    pub max_stock_level: Option<i32>,
    pub last_restock_date: Option<DateTimeWithTimeZone>,
}

async fn find_for_variant(db: &DatabaseConnection, variant_id: Uuid) -> Result<Option<inventory::Model>, ServiceError> {
    Ok(inventory::Entity::find()
        .filter(inventory::Column::ProductVariantId.eq(variant_id))
        .one(db)
        .await?)
}

/// Create the stock record of a variant. At most one per variant.
pub async fn create_inventory(
    db: &DatabaseConnection,
    actor: &Actor,
    variant_id: Uuid,
    quantity: i32,
    reserved_quantity: Option<i32>,
) -> Result<inventory::Model, ServiceError> {
    require::<product_variant::Entity, _>(db, "ProductVariant", variant_id).await?;
    if find_for_variant(db, variant_id).await?.is_some() {
        return Err(ServiceError::conflict(format!("Inventory already exists for variant {}", variant_id)));
    }
    let model = inventory::Model::new(variant_id, quantity, reserved_quantity, actor);
    let created = model.into_active_set().insert(db).await?;
    info!(variant_id = %variant_id, available = created.available_quantity, "inventory_created");
    Ok(created)
}

pub async fn adjust_inventory(
    db: &DatabaseConnection,
    actor: &Actor,
    variant_id: Uuid,
    adjustment: InventoryAdjustment,
) -> Result<inventory::Model, ServiceError> {
    let mut current = get_inventory_for_variant(db, variant_id).await?;
    if let Some(q) = adjustment.quantity { current.quantity = q; }
    if let Some(r) = adjustment.reserved_quantity { current.reserved_quantity = r; }
    if adjustment.min_stock_level.is_some() { current.min_stock_level = adjustment.min_stock_level; }
    if adjustment.max_stock_level.is_some() { current.max_stock_level = adjustment.max_stock_level; }
    if adjustment.last_restock_date.is_some() { current.last_restock_date = adjustment.last_restock_date; }
    current.recompute_available();
    let stamped = audit::stamp(current, Write::Update, actor, audit::now());
    let saved = stamped.into_active_set().update(db).await?;
    info!(variant_id = %variant_id, available = saved.available_quantity, "inventory_adjusted");
    Ok(saved)
}

pub async fn get_inventory_for_variant(db: &DatabaseConnection, variant_id: Uuid) -> Result<inventory::Model, ServiceError> {
    find_for_variant(db, variant_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Inventory not found for variant {}", variant_id)))
}
