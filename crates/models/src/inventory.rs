use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{self, Actor, Write};
use crate::product_variant;

/// Stock record, one per variant.
///
/// `available_quantity` is derived: call [`Model::recompute_available`] before
/// every write. Negative availability is not rejected.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub product_variant_id: Uuid,
    pub quantity: i32,
    pub reserved_quantity: i32,
    pub available_quantity: i32,
    pub min_stock_level: Option<i32>,
    pub max_stock_level: Option<i32>,
    pub last_restock_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Variant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Variant => Entity::belongs_to(product_variant::Entity)
                .from(Column::ProductVariantId)
                .to(product_variant::Column::Id)
                .into(),
        }
    }
}

impl Related<product_variant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Variant.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(product_variant_id: Uuid, quantity: i32, reserved_quantity: Option<i32>, actor: &Actor) -> Self {
        let now = audit::now();
        let mut model = Model {
            id: Uuid::new_v4(),
            product_variant_id,
            quantity,
            reserved_quantity: reserved_quantity.unwrap_or(0),
            available_quantity: 0,
            min_stock_level: None,
            max_stock_level: None,
            last_restock_date: None,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            is_active: true,
        };
        model.recompute_available();
        audit::stamp(model, Write::Insert, actor, now)
    }

    pub fn recompute_available(&mut self) {
        self.available_quantity = self.quantity - self.reserved_quantity;
    }

    pub fn into_active_set(mut self) -> ActiveModel {
        self.recompute_available();
        ActiveModel {
            id: Set(self.id),
            product_variant_id: Set(self.product_variant_id),
            quantity: Set(self.quantity),
            reserved_quantity: Set(self.reserved_quantity),
            available_quantity: Set(self.available_quantity),
            min_stock_level: Set(self.min_stock_level),
            max_stock_level: Set(self.max_stock_level),
            last_restock_date: Set(self.last_restock_date),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
            created_by: Set(self.created_by),
            updated_by: Set(self.updated_by),
            is_active: Set(self.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_is_derived_on_create() {
        let inv = Model::new(Uuid::new_v4(), 40, Some(15), &Actor::system());
        assert_eq!(inv.available_quantity, 25);
        assert_eq!(Model::new(Uuid::new_v4(), 7, None, &Actor::system()).available_quantity, 7);
    }

    #[test]
    fn negative_availability_is_kept() {
        let mut inv = Model::new(Uuid::new_v4(), 3, None, &Actor::system());
        inv.reserved_quantity = 5;
        inv.recompute_available();
        assert_eq!(inv.available_quantity, -2);
    }
}
