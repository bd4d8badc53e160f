use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{self, Actor, Write};
use crate::errors::ModelError;
use crate::product;

/// A brand that products are sold under.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branch")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub branch_name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Products,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Products => Entity::has_many(product::Entity).into() }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Products.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(
        branch_name: &str,
        description: Option<String>,
        logo_url: Option<String>,
        website_url: Option<String>,
        actor: &Actor,
    ) -> Result<Self, ModelError> {
        let branch_name = branch_name.trim();
        if branch_name.is_empty() {
            return Err(ModelError::Validation("branch name is required".into()));
        }
        let now = audit::now();
        let model = Model {
            id: Uuid::new_v4(),
            branch_name: branch_name.to_string(),
            description,
            logo_url,
            website_url,
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
            branch_name: Set(self.branch_name),
            description: Set(self.description),
            logo_url: Set(self.logo_url),
            website_url: Set(self.website_url),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
            created_by: Set(self.created_by),
            updated_by: Set(self.updated_by),
            is_active: Set(self.is_active),
        }
    }
}
