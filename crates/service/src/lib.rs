//! Service layer providing catalog business operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation, audit stamping and entity definitions in `models` crate.
//! - Reports failures through [`errors::ServiceError`].

pub mod errors;
pub mod pagination;
pub mod auditor;
pub mod category;
pub mod catalog;
#[cfg(test)]
pub mod test_support;
