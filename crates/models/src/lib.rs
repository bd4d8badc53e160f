pub mod errors;
pub mod db;
pub mod audit;
pub mod category;
pub mod branch;
pub mod product;
pub mod product_variant;
pub mod inventory;
pub mod product_image;
