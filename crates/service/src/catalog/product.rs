use models::audit::{self, Actor, Write};
use models::{branch, category, product};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;
use uuid::Uuid;

use super::require;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub category_id: Uuid,
    pub brand_id: Uuid,
}

/// Create a product under an existing category and brand.
pub async fn create_product(db: &DatabaseConnection, actor: &Actor, input: NewProduct) -> Result<product::Model, ServiceError> {
    require::<category::Entity, _>(db, "Category", input.category_id).await?;
    require::<branch::Entity, _>(db, "Branch", input.brand_id).await?;
    let model = product::Model::new(&input.name, input.description, input.unit, input.category_id, input.brand_id, actor)?;
    let created = model.into_active_set().insert(db).await?;
    info!(product_id = %created.id, category_id = %created.category_id, "product_created");
    Ok(created)
}

pub async fn get_product(db: &DatabaseConnection, id: Uuid) -> Result<product::Model, ServiceError> {
    require::<product::Entity, _>(db, "Product", id).await
}

/// Active products of a category, by name.
pub async fn list_products_by_category(db: &DatabaseConnection, category_id: Uuid) -> Result<Vec<product::Model>, ServiceError> {
    Ok(product::Entity::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .filter(product::Column::IsActive.eq(true))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?)
}

pub async fn set_product_active(db: &DatabaseConnection, actor: &Actor, id: Uuid, active: bool) -> Result<product::Model, ServiceError> {
    let mut current = get_product(db, id).await?;
    audit::set_active(&mut current, active);
    let stamped = audit::stamp(current, Write::Update, actor, audit::now());
    Ok(stamped.into_active_set().update(db).await?)
}
