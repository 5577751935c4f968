//! Product catalog: the validation, persistence and projection rules
//! behind the `/api/products` endpoints.

use crate::dtos::{CreateProductRequest, ProductView};
use crate::models::validate_create;
use crate::services::metrics::{PRODUCTS_CREATED, PRODUCTS_SEEDED, PRODUCT_VALIDATION_FAILURES};
use crate::services::store::{ProductFilter, ProductStore};
use metrics::counter;
use mongodb::bson;
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;
use validator::ValidationErrors;

pub const DEFAULT_LIST_LIMIT: i64 = 24;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid product: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Database not configured")]
    StoreUnavailable,

    /// A document the store just acknowledged could not be read back.
    #[error("product {0} missing after insert")]
    NotFound(String),

    #[error("failed to encode product: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(errors) => AppError::ValidationError(errors),
            CatalogError::StoreUnavailable => {
                AppError::DatabaseError(anyhow::anyhow!("Database not configured"))
            }
            CatalogError::NotFound(id) => AppError::InternalError(anyhow::anyhow!(
                "product {} was inserted but could not be read back",
                id
            )),
            CatalogError::Encode(e) => AppError::InternalError(anyhow::Error::new(e)),
            CatalogError::Store(e) => e,
        }
    }
}

struct SampleProduct {
    title: &'static str,
    description: &'static str,
    price: f64,
    image: &'static str,
}

const SAMPLE_CATEGORY: &str = "fragrance";

const SAMPLE_PRODUCTS: [SampleProduct; 4] = [
    SampleProduct {
        title: "Aurora No. 01",
        description: "Iridescent florals with a cool, glassy finish.",
        price: 89.0,
        image: "https://images.unsplash.com/photo-1611930022073-b7a4ba5fcccd?q=80&w=1200&auto=format&fit=crop",
    },
    SampleProduct {
        title: "Prism Eau de Parfum",
        description: "A minimalist blend of citrus and white musk.",
        price: 112.0,
        image: "https://images.unsplash.com/photo-1547887538-047f814b043e?q=80&w=1200&auto=format&fit=crop",
    },
    SampleProduct {
        title: "Violet Glass",
        description: "Powdery iris over clean cedar and skin.",
        price: 98.0,
        image: "https://images.unsplash.com/photo-1610375461246-83df859d849e?q=80&w=1200&auto=format&fit=crop",
    },
    SampleProduct {
        title: "Studio Light",
        description: "Transparent amber with a soft, modern glow.",
        price: 129.0,
        image: "https://images.unsplash.com/photo-1523293182086-7651a899d37f?q=80&w=1200&auto=format&fit=crop",
    },
];

impl SampleProduct {
    fn to_request(&self) -> CreateProductRequest {
        CreateProductRequest {
            title: Some(self.title.to_string()),
            description: Some(self.description.to_string()),
            price: Some(self.price),
            category: Some(SAMPLE_CATEGORY.to_string()),
            in_stock: Some(true),
            image: Some(self.image.to_string()),
        }
    }
}

/// Product operations over an optional store handle. `None` means the
/// database was never configured; every operation then fails with
/// [`CatalogError::StoreUnavailable`].
#[derive(Clone)]
pub struct ProductCatalog {
    store: Option<Arc<dyn ProductStore>>,
}

impl ProductCatalog {
    pub fn new(store: Option<Arc<dyn ProductStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Option<&Arc<dyn ProductStore>> {
        self.store.as_ref()
    }

    fn require_store(&self) -> Result<&dyn ProductStore, CatalogError> {
        self.store.as_deref().ok_or(CatalogError::StoreUnavailable)
    }

    /// At most `limit` products matching `filter`, in store order.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
    ) -> Result<Vec<ProductView>, CatalogError> {
        let store = self.require_store()?;
        let documents = store.find(filter, limit).await?;
        Ok(documents.iter().map(ProductView::from).collect())
    }

    pub async fn create(&self, input: CreateProductRequest) -> Result<ProductView, CatalogError> {
        let store = self.require_store()?;

        let product = validate_create(input).map_err(|errors| {
            counter!(PRODUCT_VALIDATION_FAILURES).increment(1);
            tracing::warn!(errors = %errors, "Rejected product payload");
            errors
        })?;

        let id = store.insert(product.to_document()?).await?;

        // Read back so the response reflects what was actually stored.
        let document = store
            .find_by_ids(std::slice::from_ref(&id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        counter!(PRODUCTS_CREATED).increment(1);
        tracing::info!(product_id = %id, title = %product.title, "Product created");

        Ok(ProductView::from(&document))
    }

    /// Populate an empty collection with the sample products.
    ///
    /// Seeding happens at most once: when any product exists nothing is
    /// written and up to [`DEFAULT_LIST_LIMIT`] existing products are
    /// returned instead. The count and the inserts are not atomic, so two
    /// concurrent calls on an empty collection can both insert.
    pub async fn seed(&self) -> Result<Vec<ProductView>, CatalogError> {
        let store = self.require_store()?;

        let existing = store.count(&ProductFilter::default()).await?;
        if existing > 0 {
            tracing::info!(existing, "Products already present, skipping seed");
            return self
                .list(&ProductFilter::default(), DEFAULT_LIST_LIMIT)
                .await;
        }

        let mut ids = Vec::with_capacity(SAMPLE_PRODUCTS.len());
        for sample in &SAMPLE_PRODUCTS {
            let product = validate_create(sample.to_request())?;
            ids.push(store.insert(product.to_document()?).await?);
        }
        counter!(PRODUCTS_SEEDED).increment(ids.len() as u64);

        let documents = store.find_by_ids(&ids).await?;
        if documents.len() != ids.len() {
            let missing = ids
                .iter()
                .find(|id| !documents.iter().any(|d| d.get("_id") == Some(*id)))
                .map(|id| id.to_string())
                .unwrap_or_default();
            return Err(CatalogError::NotFound(missing));
        }

        tracing::info!(seeded = ids.len(), "Seeded sample products");
        Ok(documents.iter().map(ProductView::from).collect())
    }
}
