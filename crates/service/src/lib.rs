//! Service layer providing business-oriented operations on top of models.
//! - Separates invariant checks from data access.
//! - Reuses entity definitions and validation in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod lookups;
pub mod section;
#[cfg(test)]
pub mod test_support;
