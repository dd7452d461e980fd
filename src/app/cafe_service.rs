//! The cafe service.
//!
//! Sits between the HTTP handlers and the `CafeStore`: it owns the store handle and the
//! delete api key, and implements the random pick and the guarded delete.

use crate::domain::{Cafe, NewCafe};
use crate::storage::{CafeStore, StoreError, StoreResult};
use rand::Rng;
use std::sync::Arc;
use subtle::ConstantTimeEq;

#[derive(Clone)]
pub struct CafeService {
    store: Arc<dyn CafeStore>,
    api_key: Arc<str>,
}

impl CafeService {
    pub fn new(store: Arc<dyn CafeStore>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn CafeStore> {
        &self.store
    }

    /// A uniformly random cafe, or `None` when the table is empty.
    pub async fn random_cafe(&self) -> StoreResult<Option<Cafe>> {
        let mut cafes = self.store.list_all().await?;
        if cafes.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..cafes.len());
        Ok(Some(cafes.swap_remove(index)))
    }

    pub async fn all_cafes(&self) -> StoreResult<Vec<Cafe>> {
        self.store.list_all().await
    }

    /// A missing `loc` never matches anything.
    pub async fn search(&self, location: Option<&str>) -> StoreResult<Option<Cafe>> {
        match location {
            Some(location) => self.store.find_by_location(location).await,
            None => Ok(None),
        }
    }

    pub async fn add(&self, cafe: NewCafe) -> StoreResult<Cafe> {
        let cafe = self.store.insert(cafe).await?;
        tracing::info!(id = cafe.id, name = %cafe.name, "cafe added");
        Ok(cafe)
    }

    pub async fn update_price(&self, id: i32, coffee_price: Option<String>) -> StoreResult<()> {
        self.store.update_price(id, coffee_price).await
    }

    /// Deletes a cafe reported as closed.
    ///
    /// A wrong key and an unknown id both come back as `NotFound`; callers cannot tell
    /// them apart.
    pub async fn report_closed(&self, id: i32, api_key: Option<&str>) -> StoreResult<()> {
        if self.store.find_by_id(id).await?.is_none() {
            tracing::warn!(id, "report-closed for unknown cafe");
            return Err(StoreError::NotFound(id));
        }
        if !self.key_matches(api_key) {
            tracing::warn!(id, "report-closed rejected: bad api key");
            return Err(StoreError::NotFound(id));
        }

        self.store.delete(id).await?;
        tracing::info!(id, "cafe reported closed and deleted");
        Ok(())
    }

    fn key_matches(&self, candidate: Option<&str>) -> bool {
        match candidate {
            Some(candidate) => bool::from(candidate.as_bytes().ct_eq(self.api_key.as_bytes())),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCafeStore;
    use std::collections::HashSet;

    fn new_cafe(name: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example".to_string(),
            img_url: "https://img.example".to_string(),
            location: "Peckham".to_string(),
            seats: "10-20".to_string(),
            has_toilet: false,
            has_wifi: true,
            has_sockets: true,
            can_take_calls: true,
            coffee_price: None,
        }
    }

    fn service() -> CafeService {
        CafeService::new(Arc::new(MemoryCafeStore::new()), "TopSecretAPIKey")
    }

    #[tokio::test]
    async fn random_on_empty_table_is_none() {
        assert!(service().random_cafe().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn random_visits_more_than_one_row() {
        let service = service();
        for name in ["One", "Two", "Three"] {
            service.add(new_cafe(name)).await.unwrap();
        }

        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(service.random_cafe().await.unwrap().unwrap().id);
        }
        assert!(seen.len() > 1);
    }

    #[tokio::test]
    async fn search_without_location_finds_nothing() {
        let service = service();
        service.add(new_cafe("Somewhere")).await.unwrap();
        assert!(service.search(None).await.unwrap().is_none());
        assert!(service.search(Some("Peckham")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn report_closed_requires_the_right_key() {
        let service = service();
        let cafe = service.add(new_cafe("Closing")).await.unwrap();

        for key in [None, Some("wrong"), Some("")] {
            assert!(matches!(
                service.report_closed(cafe.id, key).await,
                Err(StoreError::NotFound(_))
            ));
        }
        assert_eq!(service.all_cafes().await.unwrap().len(), 1);

        service
            .report_closed(cafe.id, Some("TopSecretAPIKey"))
            .await
            .unwrap();
        assert!(service.all_cafes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn report_closed_on_unknown_id_is_not_found_even_with_key() {
        assert!(matches!(
            service().report_closed(99, Some("TopSecretAPIKey")).await,
            Err(StoreError::NotFound(99))
        ));
    }
}
