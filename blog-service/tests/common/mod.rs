//! Shared helpers for blog-service integration tests.
//!
//! `InMemoryBlogStore` backs router tests that run without MongoDB;
//! `TestApp` spawns the real application against a local MongoDB.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use blog_service::config::{BlogConfig, MongoConfig};
use blog_service::models::Blog;
use blog_service::services::{BlogStore, MongoDb};
use blog_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_MONGODB_URI: &str = "mongodb://localhost:27017";

pub fn test_config(database: &str) -> BlogConfig {
    BlogConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            uri: TEST_MONGODB_URI.to_string(),
            database: database.to_string(),
            connect_timeout_secs: 5,
        },
    }
}

/// Vec-backed store with switches for simulating storage faults.
#[derive(Default)]
pub struct InMemoryBlogStore {
    blogs: Mutex<Vec<Blog>>,
    failing: AtomicBool,
    drop_inserts: AtomicBool,
}

impl InMemoryBlogStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every operation fail with a database error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Acknowledge inserts without keeping the document.
    pub fn drop_inserts(&self) {
        self.drop_inserts.store(true, Ordering::SeqCst);
    }

    pub fn seed(&self, title: &str, body: &str, is_published: bool) -> Blog {
        let blog = Blog {
            id: Some(ObjectId::new()),
            title: title.to_string(),
            body: body.to_string(),
            is_published,
        };
        self.blogs.lock().unwrap().push(blog.clone());
        blog
    }

    pub fn snapshot(&self) -> Vec<Blog> {
        self.blogs.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "simulated storage failure"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<Blog>, AppError> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Blog>, AppError> {
        self.check()?;
        Ok(self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == Some(id))
            .cloned())
    }

    async fn insert(&self, blog: &Blog) -> Result<ObjectId, AppError> {
        self.check()?;
        let id = ObjectId::new();
        if !self.drop_inserts.load(Ordering::SeqCst) {
            let mut stored = blog.clone();
            stored.id = Some(id);
            self.blogs.lock().unwrap().push(stored);
        }
        Ok(id)
    }

    async fn update_content(
        &self,
        id: ObjectId,
        title: &str,
        body: &str,
    ) -> Result<bool, AppError> {
        self.check()?;
        let mut blogs = self.blogs.lock().unwrap();
        match blogs.iter_mut().find(|b| b.id == Some(id)) {
            Some(blog) => {
                blog.title = title.to_string();
                blog.body = body.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        self.check()?;
        let mut blogs = self.blogs.lock().unwrap();
        match blogs.iter().position(|b| b.id == Some(id)) {
            Some(index) => {
                blogs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check()
    }
}

pub fn test_router(store: Arc<InMemoryBlogStore>) -> Router {
    build_router(AppState { store })
}

/// Drive one request through the router and collect the response body.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Bytes) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

pub fn json(bytes: &Bytes) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("response body should be JSON")
}

/// The real application bound to a random port and a throwaway database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("blog_test_{}", Uuid::new_v4());
        let config = test_config(&db_name);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Drop the throwaway database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
