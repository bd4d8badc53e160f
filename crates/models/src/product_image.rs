use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{self, Actor, Write};
use crate::errors::ModelError;
use crate::product_variant;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_variant_id: Uuid,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub display_order: i32,
    pub image_type: Option<String>,
    pub file_size: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
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

/// Fields supplied when attaching an image to a variant.
#[derive(Debug, Clone, Default)]
pub struct NewImage {
    pub image_url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub display_order: Option<i32>,
    pub image_type: Option<String>,
    pub file_size: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Model {
    pub fn new(product_variant_id: Uuid, input: NewImage, actor: &Actor) -> Result<Self, ModelError> {
        let url = input.image_url.trim();
        if url.is_empty() {
            return Err(ModelError::Validation("image url is required".into()));
        }
        let now = audit::now();
        let model = Model {
            id: Uuid::new_v4(),
            product_variant_id,
            image_url: url.to_string(),
            alt_text: input.alt_text,
            is_primary: input.is_primary,
            display_order: input.display_order.unwrap_or(0),
            image_type: input.image_type,
            file_size: input.file_size,
            width: input.width,
            height: input.height,
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
            product_variant_id: Set(self.product_variant_id),
            image_url: Set(self.image_url),
            alt_text: Set(self.alt_text),
            is_primary: Set(self.is_primary),
            display_order: Set(self.display_order),
            image_type: Set(self.image_type),
            file_size: Set(self.file_size),
            width: Set(self.width),
            height: Set(self.height),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
            created_by: Set(self.created_by),
            updated_by: Set(self.updated_by),
            is_active: Set(self.is_active),
        }
    }
}
