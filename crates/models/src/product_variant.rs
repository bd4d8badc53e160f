use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{self, Actor, Write};
use crate::errors::ModelError;
use crate::{inventory, product, product_image};

/// Sellable variant of a product, identified by SKU.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_variant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    #[sea_orm(unique)]
    pub sku: String,
    #[sea_orm(column_type = "Decimal(Some((8, 3)))", nullable)]
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Product,
    Inventory,
    Images,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::belongs_to(product::Entity).from(Column::ProductId).to(product::Column::Id).into(),
            Relation::Inventory => Entity::has_one(inventory::Entity).into(),
            Relation::Images => Entity::has_many(product_image::Entity).into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl Related<inventory::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inventory.def() }
}

impl Related<product_image::Entity> for Entity {
    fn to() -> RelationDef { Relation::Images.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields supplied when creating a variant.
#[derive(Debug, Clone, Default)]
pub struct NewVariant {
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Decimal,
    pub sku: String,
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
}

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

impl Model {
    pub fn new(product_id: Uuid, input: NewVariant, actor: &Actor) -> Result<Self, ModelError> {
        let sku = input.sku.trim();
        if sku.is_empty() {
            return Err(ModelError::Validation("sku is required".into()));
        }
        validate_price(input.price)?;
        let now = audit::now();
        let model = Model {
            id: Uuid::new_v4(),
            product_id,
            size: input.size,
            color: input.color,
            price: input.price,
            sku: sku.to_string(),
            weight: input.weight,
            dimensions: input.dimensions,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            is_active: true,
        };
        Ok(audit::stamp(model, Write::Insert, actor, now))
    }

    pub fn into_active_set(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            product_id: Set(self.product_id),
            size: Set(self.size),
            color: Set(self.color),
            price: Set(self.price),
            sku: Set(self.sku),
            weight: Set(self.weight),
            dimensions: Set(self.dimensions),
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
    use std::str::FromStr;

    #[test]
    fn negative_price_rejected() {
        let input = NewVariant { price: Decimal::from_str("-0.01").unwrap(), sku: "SKU-1".into(), ..Default::default() };
        assert!(Model::new(Uuid::new_v4(), input, &Actor::system()).is_err());
    }

    #[test]
    fn zero_price_and_trimmed_sku_accepted() {
        let input = NewVariant { price: Decimal::ZERO, sku: "  SKU-2 ".into(), ..Default::default() };
        let v = Model::new(Uuid::new_v4(), input, &Actor::system()).unwrap();
        assert_eq!(v.sku, "SKU-2");
    }
}
