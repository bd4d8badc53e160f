//! Category module: domain views, storage abstraction and business service.
//!
//! The service is generic over [`repository::CategoryRepository`] so it can run
//! against PostgreSQL ([`repo::seaorm::SeaOrmCategoryRepository`]) or the
//! in-memory store used by tests.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{CategoryView, CreateCategory, UpdateCategory};
pub use service::CategoryService;
