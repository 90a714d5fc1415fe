use crate::models::Blog;
use crate::services::BlogStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

const BLOGS_COLLECTION: &str = "blogs";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Connect and verify the server answers within `timeout`.
    ///
    /// The driver connects lazily, so a ping is issued here to make an
    /// unreachable database fail startup instead of the first request.
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, timeout_secs = timeout.as_secs(), "Connecting to MongoDB");

        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string {}: {}", uri, e);
            AppError::from(e)
        })?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some("blog-service".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client for {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        let mongo = Self { client, db };
        mongo.health_check().await.map_err(|e| {
            tracing::error!("Failed to reach MongoDB at {}: {}", uri, e);
            e
        })?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(mongo)
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

    pub fn blogs(&self) -> Collection<Blog> {
        self.db.collection(BLOGS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl BlogStore for MongoDb {
    async fn list(&self) -> Result<Vec<Blog>, AppError> {
        let cursor = self.blogs().find(doc! {}, None).await?;
        let blogs: Vec<Blog> = cursor.try_collect().await?;
        Ok(blogs)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Blog>, AppError> {
        let blog = self.blogs().find_one(doc! { "_id": id }, None).await?;
        Ok(blog)
    }

    async fn insert(&self, blog: &Blog) -> Result<ObjectId, AppError> {
        let result = self.blogs().insert_one(blog, None).await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "MongoDB assigned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn update_content(
        &self,
        id: ObjectId,
        title: &str,
        body: &str,
    ) -> Result<bool, AppError> {
        let update = doc! {
            "$set": {
                "title": title,
                "body": body,
            }
        };

        let previous = self
            .blogs()
            .find_one_and_update(doc! { "_id": id }, update, None)
            .await?;

        Ok(previous.is_some())
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self.blogs().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        MongoDb::health_check(self).await
    }
}
