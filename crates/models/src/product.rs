use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{self, Actor, Write};
use crate::errors::ModelError;
use crate::{branch, category, product_variant};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub category_id: Uuid,
    pub brand_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Brand,
    Variants,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::Brand => Entity::belongs_to(branch::Entity).from(Column::BrandId).to(branch::Column::Id).into(),
            Relation::Variants => Entity::has_many(product_variant::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<branch::Entity> for Entity {
    fn to() -> RelationDef { Relation::Brand.def() }
}

impl Related<product_variant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Variants.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(
        name: &str,
        description: Option<String>,
        unit: Option<String>,
        category_id: Uuid,
        brand_id: Uuid,
        actor: &Actor,
    ) -> Result<Self, ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::Validation("product name is required".into()));
        }
        let now = audit::now();
        let model = Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description,
            unit,
            category_id,
            brand_id,
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
            name: Set(self.name),
            description: Set(self.description),
            unit: Set(self.unit),
            category_id: Set(self.category_id),
            brand_id: Set(self.brand_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
            created_by: Set(self.created_by),
            updated_by: Set(self.updated_by),
            is_active: Set(self.is_active),
        }
    }
}
