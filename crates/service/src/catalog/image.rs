use models::audit::{self, Actor, Write};
use models::product_image::{self, NewImage};
use models::product_variant;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::require;
use crate::errors::ServiceError;

/// Clear the primary flag on every other image of the variant.
async fn demote_siblings<C: ConnectionTrait>(db: &C, actor: &Actor, variant_id: Uuid, keep: Uuid) -> Result<(), ServiceError> {
    let siblings = product_image::Entity::find()
        .filter(product_image::Column::ProductVariantId.eq(variant_id))
        .filter(product_image::Column::IsPrimary.eq(true))
        .filter(product_image::Column::Id.ne(keep))
        .all(db)
        .await?;
    for mut sibling in siblings {
        sibling.is_primary = false;
        let stamped = audit::stamp(sibling, Write::Update, actor, audit::now());
        stamped.into_active_set().update(db).await?;
    }
    Ok(())
}

/// Attach an image to a variant. A primary image demotes the current one.
pub async fn add_image(
    db: &DatabaseConnection,
    actor: &Actor,
    variant_id: Uuid,
    input: NewImage,
) -> Result<product_image::Model, ServiceError> {
    require::<product_variant::Entity, _>(db, "ProductVariant", variant_id).await?;
    let model = product_image::Model::new(variant_id, input, actor)?;
    let txn = db.begin().await?;
    if model.is_primary {
        demote_siblings(&txn, actor, variant_id, model.id).await?;
    }
    let created = model.into_active_set().insert(&txn).await?;
    txn.commit().await?;
    info!(image_id = %created.id, variant_id = %variant_id, primary = created.is_primary, "image_added");
    Ok(created)
}

/// Active images of a variant in display order.
pub async fn list_images_for_variant(db: &DatabaseConnection, variant_id: Uuid) -> Result<Vec<product_image::Model>, ServiceError> {
    Ok(product_image::Entity::find()
        .filter(product_image::Column::ProductVariantId.eq(variant_id))
        .filter(product_image::Column::IsActive.eq(true))
        .order_by_asc(product_image::Column::DisplayOrder)
        .order_by_asc(product_image::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn set_primary_image(db: &DatabaseConnection, actor: &Actor, image_id: Uuid) -> Result<product_image::Model, ServiceError> {
    let txn = db.begin().await?;
    let mut image = require::<product_image::Entity, _>(&txn, "ProductImage", image_id).await?;
    demote_siblings(&txn, actor, image.product_variant_id, image.id).await?;
    image.is_primary = true;
    let stamped = audit::stamp(image, Write::Update, actor, audit::now());
    let saved = stamped.into_active_set().update(&txn).await?;
    txn.commit().await?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::test_support::get_db;

    fn image(url: &str, primary: bool, order: i32) -> NewImage {
        NewImage { image_url: url.into(), is_primary: primary, display_order: Some(order), ..Default::default() }
    }

    #[tokio::test]
    async fn only_one_primary_per_variant() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let chain = fixtures::chain(&db).await?;
        let actor = Actor::system();
        let vid = chain.variant.id;

        let front = add_image(&db, &actor, vid, image("https://cdn.example.com/front.jpg", true, 2)).await?;
        let back = add_image(&db, &actor, vid, image("https://cdn.example.com/back.jpg", false, 1)).await?;
        let side = add_image(&db, &actor, vid, image("https://cdn.example.com/side.jpg", true, 3)).await?;

        let listed = list_images_for_variant(&db, vid).await?;
        assert_eq!(listed.iter().map(|i| i.id).collect::<Vec<_>>(), vec![back.id, front.id, side.id]);
        let primaries: Vec<_> = listed.iter().filter(|i| i.is_primary).map(|i| i.id).collect();
        assert_eq!(primaries, vec![side.id]);

        let promoted = set_primary_image(&db, &actor, back.id).await?;
        assert!(promoted.is_primary);
        let primaries: Vec<_> = list_images_for_variant(&db, vid).await?.into_iter().filter(|i| i.is_primary).map(|i| i.id).collect();
        assert_eq!(primaries, vec![back.id]);

        let missing = set_primary_image(&db, &actor, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
