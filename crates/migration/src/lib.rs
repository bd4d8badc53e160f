//! Migrator registering catalog tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod audit;
mod m20240601_000001_create_category;
mod m20240601_000002_create_branch;
mod m20240601_000003_create_products;
mod m20240601_000004_create_product_variant;
mod m20240601_000005_create_inventory;
mod m20240601_000006_create_product_image;
mod m20240601_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_category::Migration),
            Box::new(m20240601_000002_create_branch::Migration),
            Box::new(m20240601_000003_create_products::Migration),
            Box::new(m20240601_000004_create_product_variant::Migration),
            Box::new(m20240601_000005_create_inventory::Migration),
            Box::new(m20240601_000006_create_product_image::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000007_add_indexes::Migration),
        ]
    }
}
