use crate::models::PRODUCT_COLLECTION;
use crate::services::store::{ProductFilter, ProductStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for product-service");

        // Equality filter used by GET /api/products?category=...
        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_lookup".to_string())
                    .build(),
            )
            .build();

        self.products()
            .create_index(category_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category index on product collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on product.category");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Raw documents: reads must tolerate records that do not match the
    /// current product shape.
    pub fn products(&self) -> Collection<Document> {
        self.db.collection(PRODUCT_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ProductStore for MongoDb {
    async fn insert(&self, document: Document) -> Result<Bson, AppError> {
        let result = self
            .products()
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert product: {}", e);
                AppError::from(e)
            })?;
        Ok(result.inserted_id)
    }

    async fn find(&self, filter: &ProductFilter, limit: i64) -> Result<Vec<Document>, AppError> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self
            .products()
            .find(filter.to_document(), options)
            .await
            .map_err(AppError::from)?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn find_by_ids(&self, ids: &[Bson]) -> Result<Vec<Document>, AppError> {
        let cursor = self
            .products()
            .find(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await
            .map_err(AppError::from)?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, AppError> {
        self.products()
            .count_documents(filter.to_document(), None)
            .await
            .map_err(AppError::from)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.health_check().await
    }

    async fn collection_names(&self) -> Result<Vec<String>, AppError> {
        self.db
            .list_collection_names(None)
            .await
            .map_err(AppError::from)
    }

    fn database_name(&self) -> &str {
        self.db.name()
    }
}
