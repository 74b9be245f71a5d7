use async_trait::async_trait;

use models::section;

use super::domain::{NewSection, SectionNumberProbe, SectionPatch};
use super::errors::SectionError;

/// Persistence contract for sections.
///
/// Implementations must distinguish a missing row (`SectionError::NotFound`)
/// from any other storage failure, and `get_all` must never return a partial
/// collection: a failure on any row aborts the whole read.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Insert all eight fields and return the row with its assigned id.
    async fn create(&self, new: NewSection) -> Result<section::Model, SectionError>;
    async fn get(&self, id: i32) -> Result<section::Model, SectionError>;
    /// Full collection ordered by id. No pagination.
    async fn get_all(&self) -> Result<Vec<section::Model>, SectionError>;
    /// Apply a sparse patch; unsupplied fields are left untouched. An empty
    /// patch is a no-op returning the current row.
    async fn update(&self, id: i32, patch: &SectionPatch) -> Result<section::Model, SectionError>;
    /// Zero affected rows is reported as NotFound.
    async fn delete(&self, id: i32) -> Result<(), SectionError>;
    async fn exists_by_section_number(&self, number: i32)
        -> Result<SectionNumberProbe, SectionError>;
}

/// In-memory repository for tests and doc examples: owned state with an
/// explicit id generator, injected rather than ambient, so tests stay
/// isolated and can run in parallel.
pub mod memory {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct InMemorySectionRepository {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<i32, section::Model>,
        last_id: i32,
    }

    impl InMemorySectionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a row under an explicit id, advancing the generator past it.
        pub fn seed(&self, row: section::Model) {
            let mut inner = self.inner.lock().unwrap();
            inner.last_id = inner.last_id.max(row.id);
            inner.rows.insert(row.id, row);
        }

        pub fn len(&self) -> usize {
            self.inner.lock().unwrap().rows.len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl SectionRepository for InMemorySectionRepository {
        async fn create(&self, new: NewSection) -> Result<section::Model, SectionError> {
            let mut inner = self.inner.lock().unwrap();
            // Mirror the unique index on section_number.
            if inner.rows.values().any(|r| r.section_number == new.section_number) {
                return Err(SectionError::Conflict("section number already exists".into()));
            }
            inner.last_id += 1;
            let row = section::Model {
                id: inner.last_id,
                section_number: new.section_number,
                current_temperature: new.current_temperature,
                minimum_temperature: new.minimum_temperature,
                current_capacity: new.current_capacity,
                minimum_capacity: new.minimum_capacity,
                maximum_capacity: new.maximum_capacity,
                warehouse_id: new.warehouse_id,
                product_type_id: new.product_type_id,
            };
            inner.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn get(&self, id: i32) -> Result<section::Model, SectionError> {
            self.inner
                .lock()
                .unwrap()
                .rows
                .get(&id)
                .cloned()
                .ok_or(SectionError::NotFound)
        }

        async fn get_all(&self) -> Result<Vec<section::Model>, SectionError> {
            Ok(self.inner.lock().unwrap().rows.values().cloned().collect())
        }

        async fn update(
            &self,
            id: i32,
            patch: &SectionPatch,
        ) -> Result<section::Model, SectionError> {
            let mut inner = self.inner.lock().unwrap();
            if let Some(n) = patch.section_number {
                if inner.rows.values().any(|r| r.id != id && r.section_number == n) {
                    return Err(SectionError::Conflict("section number already exists".into()));
                }
            }
            let row = inner.rows.get_mut(&id).ok_or(SectionError::NotFound)?;
            patch.apply(row);
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), SectionError> {
            self.inner
                .lock()
                .unwrap()
                .rows
                .remove(&id)
                .map(|_| ())
                .ok_or(SectionError::NotFound)
        }

        async fn exists_by_section_number(
            &self,
            number: i32,
        ) -> Result<SectionNumberProbe, SectionError> {
            Ok(self
                .inner
                .lock()
                .unwrap()
                .rows
                .values()
                .find(|r| r.section_number == number)
                .map_or(SectionNumberProbe::Free, |r| SectionNumberProbe::TakenBy(r.id)))
        }
    }
}
