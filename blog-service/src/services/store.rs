use crate::models::Blog;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence operations the blog handlers rely on.
///
/// Each method maps to a single storage round trip.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Every stored blog, in storage order.
    async fn list(&self) -> Result<Vec<Blog>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Blog>, AppError>;

    /// Insert a draft and return the identifier the store assigned to it.
    async fn insert(&self, blog: &Blog) -> Result<ObjectId, AppError>;

    /// Set `title` and `body` on the matching blog, leaving every other field
    /// untouched. Returns `false` when nothing matched.
    async fn update_content(&self, id: ObjectId, title: &str, body: &str)
        -> Result<bool, AppError>;

    /// Delete at most one blog and return the number removed.
    async fn delete(&self, id: ObjectId) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
