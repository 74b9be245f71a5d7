use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::section;

use crate::lookups::{ProductTypeLookup, WarehouseLookup};

use super::domain::{NewSection, SectionNumberProbe, SectionPatch};
use super::errors::SectionError;
use super::repository::SectionRepository;

/// Application service enforcing section invariants ahead of storage.
///
/// Checks run strictly in sequence and short-circuit on the first failure.
/// They are not wrapped in a transaction with the eventual write, so two
/// concurrent writers can both observe a free section number; the unique
/// index on `sections.section_number` is the real enforcement and these
/// checks only fail fast.
pub struct SectionService<R: SectionRepository> {
    repo: Arc<R>,
    warehouses: Arc<dyn WarehouseLookup>,
    product_types: Arc<dyn ProductTypeLookup>,
}

impl<R: SectionRepository> SectionService<R> {
    pub fn new(
        repo: Arc<R>,
        warehouses: Arc<dyn WarehouseLookup>,
        product_types: Arc<dyn ProductTypeLookup>,
    ) -> Self {
        Self { repo, warehouses, product_types }
    }

    /// Create a section after the fixed check sequence: section-number
    /// uniqueness, then warehouse existence, then product-type existence.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::lookups::memory::StaticLookup;
    /// use service::section::domain::NewSection;
    /// use service::section::repository::memory::InMemorySectionRepository;
    /// use service::section::SectionService;
    /// let repo = Arc::new(InMemorySectionRepository::new());
    /// let lookups = Arc::new(StaticLookup::with_ids([1]));
    /// let svc = SectionService::new(repo, lookups.clone(), lookups);
    /// let created = tokio_test::block_on(svc.create(NewSection {
    ///     section_number: 10, current_temperature: -2, minimum_temperature: -8,
    ///     current_capacity: 50, minimum_capacity: 10, maximum_capacity: 100,
    ///     warehouse_id: 1, product_type_id: 1,
    /// })).unwrap();
    /// assert_eq!(created.id, 1);
    /// ```
    #[instrument(skip(self, input), fields(section_number = input.section_number))]
    pub async fn create(&self, input: NewSection) -> Result<section::Model, SectionError> {
        section::validate_section_number(input.section_number)?;
        if let SectionNumberProbe::TakenBy(existing) =
            self.repo.exists_by_section_number(input.section_number).await?
        {
            debug!(existing, "section number taken");
            return Err(SectionError::Conflict("section number already exists".into()));
        }
        self.check_warehouse(input.warehouse_id).await?;
        self.check_product_type(input.product_type_id).await?;
        let created = self.repo.create(input).await?;
        info!(section_id = created.id, "section_created");
        Ok(created)
    }

    pub async fn get_one(&self, id: i32) -> Result<section::Model, SectionError> {
        self.repo.get(id).await
    }

    /// Full collection, no pagination.
    pub async fn get_all(&self) -> Result<Vec<section::Model>, SectionError> {
        self.repo.get_all().await
    }

    /// Apply a sparse patch. Only supplied fields are validated: a patch
    /// touching none of the constrained fields performs no existence or
    /// uniqueness calls at all.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: i32,
        patch: SectionPatch,
    ) -> Result<section::Model, SectionError> {
        let existing = self.repo.get(id).await?;
        if let Some(number) = patch.section_number {
            section::validate_section_number(number)?;
            // A self-update to the entity's own number must succeed.
            match self.repo.exists_by_section_number(number).await? {
                SectionNumberProbe::TakenBy(other) if other != existing.id => {
                    return Err(SectionError::Conflict("section number already exists".into()));
                }
                _ => {}
            }
        }
        if let Some(warehouse_id) = patch.warehouse_id {
            self.check_warehouse(warehouse_id).await?;
        }
        if let Some(product_type_id) = patch.product_type_id {
            self.check_product_type(product_type_id).await?;
        }
        if patch.is_empty() {
            return Ok(existing);
        }
        let updated = self.repo.update(id, &patch).await?;
        info!(section_id = id, "section_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), SectionError> {
        self.repo.delete(id).await?;
        info!(section_id = id, "section_deleted");
        Ok(())
    }

    async fn check_warehouse(&self, id: i32) -> Result<(), SectionError> {
        let found = self
            .warehouses
            .exists(id)
            .await
            .map_err(|e| SectionError::Storage(e.to_string()))?;
        if !found {
            return Err(SectionError::Conflict("warehouse not found".into()));
        }
        Ok(())
    }

    async fn check_product_type(&self, id: i32) -> Result<(), SectionError> {
        let found = self
            .product_types
            .exists(id)
            .await
            .map_err(|e| SectionError::Storage(e.to_string()))?;
        if !found {
            return Err(SectionError::Conflict("product type not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::lookups::memory::StaticLookup;
    use crate::lookups::{LookupError, ProductTypeLookup, WarehouseLookup};
    use crate::section::outcome::Outcome;
    use crate::section::repository::memory::InMemorySectionRepository;

    use super::*;

    /// Lookup recording how often it was consulted.
    #[derive(Default)]
    struct CountingLookup {
        ids: HashSet<i32>,
        calls: AtomicUsize,
    }

    impl CountingLookup {
        fn with_ids(ids: impl IntoIterator<Item = i32>) -> Self {
            Self { ids: ids.into_iter().collect(), calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WarehouseLookup for CountingLookup {
        async fn exists(&self, id: i32) -> Result<bool, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.ids.contains(&id))
        }
    }

    #[async_trait]
    impl ProductTypeLookup for CountingLookup {
        async fn exists(&self, id: i32) -> Result<bool, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.ids.contains(&id))
        }
    }

    fn new_section(number: i32, warehouse_id: i32, product_type_id: i32) -> NewSection {
        NewSection {
            section_number: number,
            current_temperature: -2,
            minimum_temperature: -8,
            current_capacity: 50,
            minimum_capacity: 10,
            maximum_capacity: 100,
            warehouse_id,
            product_type_id,
        }
    }

    fn service(
        repo: Arc<InMemorySectionRepository>,
    ) -> SectionService<InMemorySectionRepository> {
        let lookups = Arc::new(StaticLookup::with_ids([1, 2]));
        SectionService::new(repo, lookups.clone(), lookups)
    }

    #[tokio::test]
    async fn create_assigns_the_next_id() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo.clone());
        let created = svc.create(new_section(10, 1, 1)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.section_number, 10);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn create_with_taken_number_conflicts_and_leaves_count_unchanged() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo.clone());
        svc.create(new_section(10, 1, 1)).await.unwrap();

        let res = svc.create(new_section(10, 1, 1)).await;
        let err = res.unwrap_err();
        assert!(matches!(err, SectionError::Conflict(_)));
        assert_eq!(err.to_string(), "conflict: section number already exists");
        assert_eq!(Outcome::from(&err).code(), 409);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_number_short_circuits_before_reference_checks() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let warehouses = Arc::new(CountingLookup::with_ids([1]));
        let product_types = Arc::new(CountingLookup::with_ids([1]));
        let svc =
            SectionService::new(repo.clone(), warehouses.clone(), product_types.clone());
        svc.create(new_section(10, 1, 1)).await.unwrap();
        assert_eq!(warehouses.calls(), 1);
        assert_eq!(product_types.calls(), 1);

        let _ = svc.create(new_section(10, 1, 1)).await.unwrap_err();
        assert_eq!(warehouses.calls(), 1);
        assert_eq!(product_types.calls(), 1);
    }

    #[tokio::test]
    async fn missing_warehouse_conflicts_before_product_type_is_consulted() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let warehouses = Arc::new(CountingLookup::with_ids([1]));
        let product_types = Arc::new(CountingLookup::with_ids([1]));
        let svc =
            SectionService::new(repo.clone(), warehouses.clone(), product_types.clone());

        let err = svc.create(new_section(20, 999, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: warehouse not found");
        assert_eq!(product_types.calls(), 0);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn missing_product_type_conflicts() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let err = svc.create(new_section(20, 1, 999)).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: product type not found");
    }

    #[tokio::test]
    async fn nonpositive_section_number_is_rejected() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let err = svc.create(new_section(0, 1, 1)).await.unwrap_err();
        assert!(matches!(err, SectionError::Validation(_)));
        assert_eq!(Outcome::from(&err), Outcome::Conflict);
    }

    #[tokio::test]
    async fn empty_patch_is_a_noop_returning_the_row_unchanged() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let warehouses = Arc::new(CountingLookup::with_ids([1]));
        let product_types = Arc::new(CountingLookup::with_ids([1]));
        let svc =
            SectionService::new(repo.clone(), warehouses.clone(), product_types.clone());
        let created = svc.create(new_section(10, 1, 1)).await.unwrap();
        let lookups_before = warehouses.calls() + product_types.calls();

        let updated = svc.update(created.id, SectionPatch::default()).await.unwrap();
        assert_eq!(updated, created);
        assert_eq!(repo.get(created.id).await.unwrap(), created);
        // An empty patch performs no existence or uniqueness calls.
        assert_eq!(warehouses.calls() + product_types.calls(), lookups_before);
    }

    #[tokio::test]
    async fn updating_to_own_number_is_not_a_conflict() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let created = svc.create(new_section(10, 1, 1)).await.unwrap();
        let patch = SectionPatch { section_number: Some(10), ..Default::default() };
        let updated = svc.update(created.id, patch).await.unwrap();
        assert_eq!(updated.section_number, 10);
    }

    #[tokio::test]
    async fn updating_to_a_taken_number_conflicts() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        svc.create(new_section(10, 1, 1)).await.unwrap();
        let second = svc.create(new_section(20, 1, 1)).await.unwrap();
        let patch = SectionPatch { section_number: Some(10), ..Default::default() };
        let err = svc.update(second.id, patch).await.unwrap_err();
        assert!(matches!(err, SectionError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let created = svc.create(new_section(10, 1, 1)).await.unwrap();
        let patch = SectionPatch { current_temperature: Some(-10), ..Default::default() };
        let updated = svc.update(created.id, patch).await.unwrap();
        assert_eq!(updated.current_temperature, -10);
        assert_eq!(
            section::Model { current_temperature: created.current_temperature, ..updated },
            created
        );
    }

    #[tokio::test]
    async fn update_of_missing_section_is_not_found() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let patch = SectionPatch { current_capacity: Some(5), ..Default::default() };
        let err = svc.update(42, patch).await.unwrap_err();
        assert!(matches!(err, SectionError::NotFound));
    }

    #[tokio::test]
    async fn update_with_dangling_warehouse_reference_conflicts() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let created = svc.create(new_section(10, 1, 1)).await.unwrap();
        let patch = SectionPatch { warehouse_id: Some(999), ..Default::default() };
        let err = svc.update(created.id, patch).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: warehouse not found");
    }

    #[tokio::test]
    async fn delete_of_missing_section_is_not_found_and_leaves_others() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo.clone());
        svc.create(new_section(10, 1, 1)).await.unwrap();
        let err = svc.delete(42).await.unwrap_err();
        assert!(matches!(err, SectionError::NotFound));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_all_returns_every_row_in_original_order() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        for n in [10, 20, 30] {
            svc.create(new_section(n, 1, 1)).await.unwrap();
        }
        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all.iter().map(|r| r.section_number).collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn scenario_walkthrough() {
        let repo = Arc::new(InMemorySectionRepository::new());
        let svc = service(repo);
        let seeded = svc.create(new_section(10, 1, 1)).await.unwrap();
        assert_eq!(seeded.id, 1);

        let res = svc.create(new_section(10, 1, 1)).await;
        assert_eq!(Outcome::classify(&res, Outcome::Created), Outcome::Conflict);
        assert_eq!(res.unwrap_err().to_string(), "conflict: section number already exists");

        let res = svc.create(new_section(20, 999, 1)).await;
        assert_eq!(Outcome::classify(&res, Outcome::Created), Outcome::Conflict);
        assert_eq!(res.unwrap_err().to_string(), "conflict: warehouse not found");

        let res = svc.get_one(1).await;
        assert_eq!(Outcome::classify(&res, Outcome::Ok), Outcome::Ok);
        assert_eq!(res.unwrap(), seeded);

        let res = svc.delete(1).await;
        assert_eq!(Outcome::classify(&res, Outcome::NoContent), Outcome::NoContent);

        let res = svc.get_one(1).await;
        assert_eq!(Outcome::classify(&res, Outcome::Ok), Outcome::NotFound);
    }
}
