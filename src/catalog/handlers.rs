//! REST API handlers for the product catalog
//!
//! This module implements HTTP endpoints for listing products and loading a
//! single product.

use super::{
    errors::CatalogError,
    images::{ImageResolver, ImageSize},
    models::Product,
    store::{CatalogOrigin, CatalogStore, LoadStatus},
};
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

/// A product together with its resolved image
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub image_url: String,
}

impl ProductView {
    pub fn new(product: Product, images: &ImageResolver, size: ImageSize) -> Self {
        let image_url = images.resolve(product.thumbnail.as_deref(), size);
        Self { product, image_url }
    }
}

/// Response for the product listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub status: LoadStatus,
    pub origin: Option<CatalogOrigin>,
    /// Why fallback products are shown, if they are
    pub error: Option<String>,
    pub items: Vec<ProductView>,
}

impl CatalogResponse {
    fn from_store(store: CatalogStore, images: &ImageResolver) -> Self {
        Self {
            status: store.status(),
            origin: store.origin(),
            error: store.error().map(str::to_owned),
            items: store
                .items()
                .iter()
                .cloned()
                .map(|product| ProductView::new(product, images, ImageSize::Card))
                .collect(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match self {
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::FetchFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Endpoint: GET /products
/// Reloads the catalog, falling back to the built-in products when needed.
async fn list_products(State(state): State<SharedState>) -> Json<CatalogResponse> {
    let store = state.catalog.load_all().await;

    Json(CatalogResponse::from_store(store, &state.images))
}

/// Endpoint: GET /products/:id
/// Loads a single product and makes it the selected product.
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, CatalogError> {
    let product = state.catalog.load_by_id(&id).await?;

    Ok(Json(ProductView::new(product, &state.images, ImageSize::Card)))
}
