use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{self, Actor, Write};
use crate::errors::ModelError;
use crate::product;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Parent,
    Products,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Parent => Entity::belongs_to(Entity).from(Column::ParentId).to(Column::Id).into(),
            Relation::Products => Entity::has_many(product::Entity).into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trimmed name within 2..=100 characters.
pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(ModelError::Validation("name is required".into()));
    }
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(ModelError::Validation(format!(
            "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ModelError::Validation(format!(
            "description must not exceed {DESCRIPTION_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

impl Model {
    /// New active category stamped for insert.
    pub fn new(
        name: &str,
        description: Option<String>,
        parent_id: Option<Uuid>,
        display_order: Option<i32>,
        actor: &Actor,
    ) -> Result<Self, ModelError> {
        let name = validate_name(name)?;
        if let Some(d) = description.as_deref() {
            validate_description(d)?;
        }
        let now = audit::now();
        let model = Model {
            id: Uuid::new_v4(),
            name,
            description,
            parent_id,
            display_order: display_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            is_active: true,
        };
        Ok(audit::stamp(model, Write::Insert, actor, now))
    }

    /// Active model with every column marked as set.
    pub fn into_active_set(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            description: Set(self.description),
            parent_id: Set(self.parent_id),
            display_order: Set(self.display_order),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
            created_by: Set(self.created_by),
            updated_by: Set(self.updated_by),
            is_active: Set(self.is_active),
        }
    }
}
