use models::audit::Actor;
use models::product_variant::{self, NewVariant};
use models::product;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{info, warn};
use uuid::Uuid;

use super::require;
use crate::errors::ServiceError;

/// Create a variant; the SKU must be unused.
pub async fn create_variant(
    db: &DatabaseConnection,
    actor: &Actor,
    product_id: Uuid,
    input: NewVariant,
) -> Result<product_variant::Model, ServiceError> {
    require::<product::Entity, _>(db, "Product", product_id).await?;
    let model = product_variant::Model::new(product_id, input, actor)?;
    if find_variant_by_sku(db, &model.sku).await?.is_some() {
        warn!(sku = %model.sku, "duplicate sku");
        return Err(ServiceError::conflict(format!("Variant with sku '{}' already exists", model.sku)));
    }
    let created = model.into_active_set().insert(db).await?;
    info!(variant_id = %created.id, sku = %created.sku, "variant_created");
    Ok(created)
}

pub async fn get_variant(db: &DatabaseConnection, id: Uuid) -> Result<product_variant::Model, ServiceError> {
    require::<product_variant::Entity, _>(db, "ProductVariant", id).await
}

pub async fn find_variant_by_sku(db: &DatabaseConnection, sku: &str) -> Result<Option<product_variant::Model>, ServiceError> {
    Ok(product_variant::Entity::find()
        .filter(product_variant::Column::Sku.eq(sku.trim()))
        .one(db)
        .await?)
}

/// Active variants of a product, by SKU.
pub async fn list_variants_for_product(db: &DatabaseConnection, product_id: Uuid) -> Result<Vec<product_variant::Model>, ServiceError> {
    Ok(product_variant::Entity::find()
        .filter(product_variant::Column::ProductId.eq(product_id))
        .filter(product_variant::Column::IsActive.eq(true))
        .order_by_asc(product_variant::Column::Sku)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::test_support::get_db;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn sku_is_unique_and_price_non_negative() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let chain = fixtures::chain(&db).await?;
        let actor = Actor::system();

        let dup = create_variant(
            &db,
            &actor,
            chain.product.id,
            NewVariant { price: Decimal::ONE, sku: chain.variant.sku.clone(), ..Default::default() },
        )
        .await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let negative = create_variant(
            &db,
            &actor,
            chain.product.id,
            NewVariant { price: Decimal::new(-100, 2), sku: format!("NEG-{}", Uuid::new_v4()), ..Default::default() },
        )
        .await;
        assert!(negative.as_ref().is_err_and(|e| e.is_validation()));

        let missing = create_variant(&db, &actor, Uuid::new_v4(), NewVariant { sku: "X-1".into(), ..Default::default() }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let found = find_variant_by_sku(&db, &format!(" {} ", chain.variant.sku)).await?;
        assert_eq!(found.map(|v| v.id), Some(chain.variant.id));
        let listed = list_variants_for_product(&db, chain.product.id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(get_variant(&db, chain.variant.id).await?.price, Decimal::new(1_990, 2));
        Ok(())
    }
}
