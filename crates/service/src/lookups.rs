//! Collaborator contracts consumed by the section service.
//!
//! Each collaborator exposes a single existence check by id; the entities
//! themselves are owned by their own CRUD modules.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("lookup failed: {0}")]
pub struct LookupError(pub String);

#[async_trait]
pub trait WarehouseLookup: Send + Sync {
    async fn exists(&self, id: i32) -> Result<bool, LookupError>;
}

#[async_trait]
pub trait ProductTypeLookup: Send + Sync {
    async fn exists(&self, id: i32) -> Result<bool, LookupError>;
}

pub struct SeaOrmWarehouseLookup {
    pub db: DatabaseConnection,
}

#[async_trait]
impl WarehouseLookup for SeaOrmWarehouseLookup {
    async fn exists(&self, id: i32) -> Result<bool, LookupError> {
        models::warehouse::exists(&self.db, id)
            .await
            .map_err(|e| LookupError(e.to_string()))
    }
}

pub struct SeaOrmProductTypeLookup {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductTypeLookup for SeaOrmProductTypeLookup {
    async fn exists(&self, id: i32) -> Result<bool, LookupError> {
        models::product_type::exists(&self.db, id)
            .await
            .map_err(|e| LookupError(e.to_string()))
    }
}

/// Fixed-content lookups for tests and doc examples.
pub mod memory {
    use std::collections::HashSet;

    use super::*;

    #[derive(Default)]
    pub struct StaticLookup {
        ids: HashSet<i32>,
    }

    impl StaticLookup {
        pub fn with_ids(ids: impl IntoIterator<Item = i32>) -> Self {
            Self { ids: ids.into_iter().collect() }
        }
    }

    #[async_trait]
    impl WarehouseLookup for StaticLookup {
        async fn exists(&self, id: i32) -> Result<bool, LookupError> {
            Ok(self.ids.contains(&id))
        }
    }

    #[async_trait]
    impl ProductTypeLookup for StaticLookup {
        async fn exists(&self, id: i32) -> Result<bool, LookupError> {
            Ok(self.ids.contains(&id))
        }
    }
}
