//! Document-store seam for the product collection.
//!
//! The catalog only ever talks to [`ProductStore`]; MongoDB and the
//! in-memory store are interchangeable behind it.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use tokio::sync::RwLock;

/// Equality filter over product documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if let Some(category) = &self.category {
            filter.insert("category", category.as_str());
        }
        filter
    }

    pub fn matches(&self, document: &Document) -> bool {
        match &self.category {
            Some(category) => document
                .get_str("category")
                .map(|value| value == category)
                .unwrap_or(false),
            None => true,
        }
    }
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert one document and return the identifier the store assigned.
    async fn insert(&self, document: Document) -> Result<Bson, AppError>;

    /// Documents matching `filter`, in store order. A `limit` of 0 means
    /// unbounded; negative limits are treated by magnitude.
    async fn find(&self, filter: &ProductFilter, limit: i64) -> Result<Vec<Document>, AppError>;

    async fn find_by_ids(&self, ids: &[Bson]) -> Result<Vec<Document>, AppError>;

    async fn count(&self, filter: &ProductFilter) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    async fn collection_names(&self) -> Result<Vec<String>, AppError>;

    fn database_name(&self) -> &str;
}

/// Process-local store keeping documents in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing records, e.g. legacy documents written by
    /// an older schema. They are stored as given.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, mut document: Document) -> Result<Bson, AppError> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut documents = self.documents.write().await;
        if documents.iter().any(|existing| existing.get("_id") == Some(&id)) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: _id {}",
                id
            )));
        }
        documents.push(document);
        Ok(id)
    }

    async fn find(&self, filter: &ProductFilter, limit: i64) -> Result<Vec<Document>, AppError> {
        let cap = match limit {
            0 => usize::MAX,
            n => usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX),
        };

        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| filter.matches(document))
            .take(cap)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[Bson]) -> Result<Vec<Document>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| document.get("_id").is_some_and(|id| ids.contains(id)))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, AppError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|document| filter.matches(document)).count() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn collection_names(&self) -> Result<Vec<String>, AppError> {
        // Mirrors MongoDB, where a collection exists once it holds a document.
        if self.documents.read().await.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![crate::models::PRODUCT_COLLECTION.to_string()])
        }
    }

    fn database_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_object_ids() {
        let store = InMemoryProductStore::new();
        let id = store.insert(doc! { "title": "a" }).await.unwrap();

        assert!(matches!(id, Bson::ObjectId(_)));
        let found = store.find_by_ids(&[id.clone()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("_id"), Some(&id));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = InMemoryProductStore::new();
        store.insert(doc! { "_id": "same" }).await.unwrap();

        assert!(store.insert(doc! { "_id": "same" }).await.is_err());
        assert_eq!(store.count(&ProductFilter::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_filters_and_limits_in_insertion_order() {
        let store = InMemoryProductStore::new();
        for (title, category) in [("a", "x"), ("b", "y"), ("c", "x"), ("d", "x")] {
            store
                .insert(doc! { "title": title, "category": category })
                .await
                .unwrap();
        }

        let titles = |docs: Vec<Document>| -> Vec<String> {
            docs.iter()
                .map(|d| d.get_str("title").unwrap().to_string())
                .collect()
        };

        let xs = store.find(&ProductFilter::category("x"), 2).await.unwrap();
        assert_eq!(titles(xs), vec!["a", "c"]);

        let all = store.find(&ProductFilter::default(), 0).await.unwrap();
        assert_eq!(all.len(), 4);

        assert_eq!(store.count(&ProductFilter::category("y")).await.unwrap(), 1);
        assert_eq!(store.count(&ProductFilter::category("z")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn collections_appear_after_first_insert() {
        let store = InMemoryProductStore::new();
        assert!(store.collection_names().await.unwrap().is_empty());

        store.insert(doc! { "title": "a" }).await.unwrap();
        assert_eq!(store.collection_names().await.unwrap(), vec!["product"]);
    }

    #[test]
    fn filter_document_only_carries_set_fields() {
        assert_eq!(ProductFilter::default().to_document(), doc! {});
        assert_eq!(
            ProductFilter::category("fragrance").to_document(),
            doc! { "category": "fragrance" }
        );
    }
}
