//! Service layer providing business operations on top of models.
//! - Separates business logic from data access (repository traits + SeaORM and in-memory impls).
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod ordered;
pub mod contact;
pub mod contact_info;
pub mod auth;
#[cfg(test)]
pub mod test_support;
