use crate::dtos::{BlogPayload, BlogResponse, UpdatedBlogResponse, BLOG_DELETED_MESSAGE};
use crate::middleware::JsonBody;
use crate::models::Blog;
use crate::services::{record_blog_operation, BlogOperation};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Parse a path identifier into an `ObjectId`.
///
/// Malformed identifiers surface as `InvalidIdentifier`, which responds 500.
pub fn parse_blog_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|e| AppError::InvalidIdentifier(format!("{:?} is not an ObjectId: {}", raw, e)))
}

fn outcome<T>(result: &Result<T, AppError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(AppError::NotFound(_)) => "not_found",
        Err(_) => "error",
    }
}

fn observe<T>(operation: BlogOperation, result: Result<T, AppError>) -> Result<T, AppError> {
    record_blog_operation(operation, outcome(&result));
    result
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Blog {} not found", id))
}

pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let result: Result<Vec<BlogResponse>, AppError> = async {
        let blogs = state.store.list().await?;
        Ok(blogs.into_iter().map(BlogResponse::from).collect())
    }
    .await;

    observe(BlogOperation::List, result).map(Json)
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    let result: Result<Blog, AppError> = async {
        let blog_id = parse_blog_id(&id)?;
        state
            .store
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| not_found(&id))
    }
    .await;

    observe(BlogOperation::Get, result).map(|blog| Json(BlogResponse::from(blog)))
}

// Body decode errors are taken as a `Result` so they are counted like any
// other failure of the operation.
pub async fn create_blog(
    State(state): State<AppState>,
    payload: Result<JsonBody<BlogPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let result: Result<Blog, AppError> = async {
        let JsonBody(payload) = payload?;
        let draft = Blog::draft(payload.title, payload.body);

        let blog_id = state.store.insert(&draft).await.map_err(|e| {
            tracing::error!("Failed to insert blog: {}", e);
            e
        })?;

        // Read back on its own error channel; a missing document here is a
        // server fault, not an empty success.
        let created = state
            .store
            .find_by_id(blog_id)
            .await
            .map_err(|e| {
                tracing::error!(blog_id = %blog_id, "Failed to read back created blog: {}", e);
                e
            })?
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Created blog {} could not be read back",
                    blog_id
                ))
            })?;

        tracing::info!(blog_id = %blog_id, "Blog created");
        Ok(created)
    }
    .await;

    observe(BlogOperation::Create, result)
        .map(|blog| (StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<JsonBody<BlogPayload>, AppError>,
) -> Result<Json<UpdatedBlogResponse>, AppError> {
    let result: Result<UpdatedBlogResponse, AppError> = async {
        let blog_id = parse_blog_id(&id)?;
        let JsonBody(payload) = payload?;

        let matched = state
            .store
            .update_content(blog_id, &payload.title, &payload.body)
            .await?;
        if !matched {
            return Err(not_found(&id));
        }

        tracing::info!(blog_id = %blog_id, "Blog updated");
        Ok(UpdatedBlogResponse {
            id,
            title: payload.title,
            body: payload.body,
        })
    }
    .await;

    observe(BlogOperation::Update, result).map(Json)
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let result: Result<&'static str, AppError> = async {
        let blog_id = parse_blog_id(&id)?;

        let deleted = state.store.delete(blog_id).await?;
        if deleted == 0 {
            return Err(not_found(&id));
        }

        tracing::info!(blog_id = %blog_id, "Blog deleted");
        Ok(BLOG_DELETED_MESSAGE)
    }
    .await;

    observe(BlogOperation::Delete, result).map(Json)
}
