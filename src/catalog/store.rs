//! Catalog State Management
//!
//! [`CatalogStore`] is the plain state (products, selection, load status).
//! [`Catalog`] wraps it behind a lock together with the product source and
//! performs the fallback reconciliation on every load.

use super::{
    errors::CatalogError,
    fallback::{fallback_products, find_fallback},
    models::Product,
    source::{ProductSource, SourceError},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

// =============================================================================
// Store State
// =============================================================================

/// Lifecycle of the most recent catalog load.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Where the stored product collection came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    Remote,
    Fallback,
}

/// Product collection, selected product and load status.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Vec<Product>,
    selected: Option<Product>,
    status: LoadStatus,
    origin: Option<CatalogOrigin>,
    error: Option<String>,
}

impl CatalogStore {
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Origin of `items`, `None` until the first load completes.
    pub fn origin(&self) -> Option<CatalogOrigin> {
        self.origin
    }

    /// Message of the last failure, kept for diagnostics.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Finds a product in the collection, then in the selection.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.items
            .iter()
            .chain(self.selected.iter())
            .find(|product| product.matches_id(id))
    }

    fn begin_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    fn replace_items(&mut self, loaded: LoadedProducts) {
        self.items = loaded.items;
        self.origin = Some(loaded.origin);
        self.error = loaded.failure;
        self.status = LoadStatus::Succeeded;
    }

    fn apply_selection(&mut self, result: &Result<Product, CatalogError>) {
        match result {
            Ok(product) => {
                self.selected = Some(product.clone());
                self.status = LoadStatus::Succeeded;
                self.error = None;
            }
            Err(error) => {
                self.status = LoadStatus::Failed;
                self.error = Some(error.to_string());
            }
        }
    }

    fn clear_selected(&mut self) {
        self.selected = None;
    }
}

// =============================================================================
// Fallback Reconciliation
// =============================================================================

/// Product collection produced by [`load_products`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProducts {
    pub items: Vec<Product>,
    pub origin: CatalogOrigin,
    /// Why the fallback list was used, if it was.
    pub failure: Option<String>,
}

/// Fetches the collection, substituting the fallback list when the source
/// fails or has no products. Never returns an empty list.
pub async fn load_products(source: &dyn ProductSource) -> LoadedProducts {
    let failure = match source.fetch_all().await {
        Ok(items) if !items.is_empty() => {
            return LoadedProducts {
                items,
                origin: CatalogOrigin::Remote,
                failure: None,
            }
        }
        Ok(_) => "product API returned no products".to_owned(),
        Err(error) => error.to_string(),
    };

    warn!(reason = %failure, "using fallback product catalog");

    LoadedProducts {
        items: fallback_products(),
        origin: CatalogOrigin::Fallback,
        failure: Some(failure),
    }
}

/// Finds one product by id in the fetched collection, or in the fallback
/// list when the fetch fails or has no match.
///
/// # Errors
///
/// * [`CatalogError::NotFound`] when the API answered (successfully or with an
///   error status) and neither source has the product.
/// * [`CatalogError::FetchFailed`] when the API could not be reached or its
///   body could not be decoded, and the fallback list has no match.
pub async fn resolve_product(source: &dyn ProductSource, id: &str) -> Result<Product, CatalogError> {
    match source.fetch_all().await {
        Ok(items) => items
            .into_iter()
            .find(|product| product.matches_id(id))
            .or_else(|| find_fallback(id))
            .ok_or(CatalogError::NotFound),
        Err(SourceError::Status(status)) => {
            warn!(status, id, "product API request failed, searching fallback catalog");
            find_fallback(id).ok_or(CatalogError::NotFound)
        }
        Err(error) => {
            warn!(%error, id, "product API unreachable, searching fallback catalog");
            find_fallback(id).ok_or_else(|| CatalogError::FetchFailed(error.to_string()))
        }
    }
}

// =============================================================================
// Shared Catalog
// =============================================================================

/// Shared catalog: a [`CatalogStore`] fed from a [`ProductSource`].
///
/// The lock is released while the source is queried, so overlapping loads all
/// complete and the last one to finish wins.
pub struct Catalog {
    source: Arc<dyn ProductSource>,
    store: RwLock<CatalogStore>,
}

impl Catalog {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            store: RwLock::new(CatalogStore::default()),
        }
    }

    /// Reloads the whole collection and returns the resulting state.
    pub async fn load_all(&self) -> CatalogStore {
        self.store.write().await.begin_loading();

        let loaded = load_products(self.source.as_ref()).await;
        debug!(count = loaded.items.len(), origin = ?loaded.origin, "catalog loaded");

        let mut store = self.store.write().await;
        store.replace_items(loaded);
        store.clone()
    }

    /// Loads one product and makes it the selected product.
    ///
    /// # Errors
    ///
    /// See [`resolve_product`].
    pub async fn load_by_id(&self, id: &str) -> Result<Product, CatalogError> {
        self.store.write().await.begin_loading();

        let result = resolve_product(self.source.as_ref(), id).await;
        debug!(id, found = result.is_ok(), "product lookup finished");

        self.store.write().await.apply_selection(&result);
        result
    }

    /// Looks up a product without changing the store.
    ///
    /// Already loaded products are used first; otherwise the product is
    /// resolved the same way as [`Catalog::load_by_id`].
    ///
    /// # Errors
    ///
    /// See [`resolve_product`].
    pub async fn find_product(&self, id: &str) -> Result<Product, CatalogError> {
        if let Some(product) = self.store.read().await.find(id) {
            return Ok(product.clone());
        }

        resolve_product(self.source.as_ref(), id).await
    }

    pub async fn clear_selected(&self) {
        self.store.write().await.clear_selected();
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> CatalogStore {
        self.store.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::MockProductSource;
    use rust_decimal::Decimal;

    fn source_returning(items: Vec<Product>) -> Arc<dyn ProductSource> {
        let mut source = MockProductSource::new();
        source
            .expect_fetch_all()
            .returning(move || Ok(items.clone()));
        Arc::new(source)
    }

    fn source_failing(status: u16) -> Arc<dyn ProductSource> {
        let mut source = MockProductSource::new();
        source
            .expect_fetch_all()
            .returning(move || Err(SourceError::Status(status)));
        Arc::new(source)
    }

    fn source_unreachable() -> Arc<dyn ProductSource> {
        let mut source = MockProductSource::new();
        source
            .expect_fetch_all()
            .returning(|| Err(SourceError::Decode("expected value at line 1".into())));
        Arc::new(source)
    }

    fn remote_products() -> Vec<Product> {
        vec![
            Product::new(101, "Denim Jacket").with_price(Decimal::new(8900, 2)),
            Product::new(102, "Canvas Sneakers").with_price(Decimal::new(4550, 2)),
        ]
    }

    #[tokio::test]
    async fn test_load_all_uses_remote_products() {
        let catalog = Catalog::new(source_returning(remote_products()));

        let state = catalog.load_all().await;

        assert_eq!(state.status(), LoadStatus::Succeeded);
        assert_eq!(state.origin(), Some(CatalogOrigin::Remote));
        assert_eq!(state.items().len(), 2);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_load_all_falls_back_on_failure() {
        for source in [source_failing(500), source_unreachable()] {
            let catalog = Catalog::new(source);

            let state = catalog.load_all().await;

            assert_eq!(state.status(), LoadStatus::Succeeded);
            assert_eq!(state.origin(), Some(CatalogOrigin::Fallback));
            assert_eq!(state.items(), fallback_products().as_slice());
            assert!(state.error().is_some());
        }
    }

    #[tokio::test]
    async fn test_load_all_falls_back_on_empty_data() {
        let catalog = Catalog::new(source_returning(Vec::new()));

        let state = catalog.load_all().await;

        assert_eq!(state.items().len(), 8);
        assert_eq!(state.origin(), Some(CatalogOrigin::Fallback));
    }

    #[tokio::test]
    async fn test_load_all_replaces_collection() {
        let mut source = MockProductSource::new();
        let mut calls = 0;
        source.expect_fetch_all().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(remote_products())
            } else {
                Err(SourceError::Status(503))
            }
        });
        let catalog = Catalog::new(Arc::new(source));

        catalog.load_all().await;
        let state = catalog.load_all().await;

        assert_eq!(state.items().len(), 8);
        assert!(state.find("101").is_none());
    }

    #[tokio::test]
    async fn test_load_by_id_prefers_remote_then_fallback() {
        let catalog = Catalog::new(source_returning(remote_products()));

        let remote = catalog.load_by_id("102").await.unwrap();
        assert_eq!(remote.name, "Canvas Sneakers");

        let fallback = catalog.load_by_id("4").await.unwrap();
        assert_eq!(fallback.name, "Stainless Steel Water Bottle");

        let state = catalog.snapshot().await;
        assert_eq!(state.selected().map(|p| p.id), Some(4));
        assert!(state.items().is_empty(), "collection is untouched");
    }

    #[tokio::test]
    async fn test_load_by_id_not_found() {
        for source in [source_returning(remote_products()), source_failing(404)] {
            let catalog = Catalog::new(source);

            let result = catalog.load_by_id("999").await;

            assert_eq!(result, Err(CatalogError::NotFound));
            let state = catalog.snapshot().await;
            assert_eq!(state.status(), LoadStatus::Failed);
            assert_eq!(state.error(), Some("Product not found"));
        }
    }

    #[tokio::test]
    async fn test_load_by_id_unreachable() {
        let catalog = Catalog::new(source_unreachable());

        let found = catalog.load_by_id("1").await.unwrap();
        assert_eq!(found.name, "Premium Leather Jacket");

        let missing = catalog.load_by_id("999").await;
        assert!(matches!(missing, Err(CatalogError::FetchFailed(_))));
        assert_ne!(missing, Err(CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_previous_selection() {
        let catalog = Catalog::new(source_returning(remote_products()));
        catalog.load_by_id("101").await.unwrap();

        let missing = catalog.load_by_id("999").await;

        assert_eq!(missing, Err(CatalogError::NotFound));
        let state = catalog.snapshot().await;
        assert_eq!(state.status(), LoadStatus::Failed);
        assert_eq!(state.selected().map(|p| p.id), Some(101));
    }

    #[tokio::test]
    async fn test_find_product_uses_loaded_items_first() {
        let mut source = MockProductSource::new();
        source
            .expect_fetch_all()
            .times(1)
            .returning(|| Ok(remote_products()));
        let catalog = Catalog::new(Arc::new(source));

        catalog.load_all().await;
        let product = catalog.find_product("101").await.unwrap();

        assert_eq!(product.name, "Denim Jacket");
        assert!(catalog.snapshot().await.selected().is_none());
    }

    #[tokio::test]
    async fn test_clear_selected() {
        let catalog = Catalog::new(source_returning(remote_products()));
        catalog.load_by_id("101").await.unwrap();

        catalog.clear_selected().await;

        assert!(catalog.snapshot().await.selected().is_none());
    }
}
