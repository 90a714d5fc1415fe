use crate::models::Blog;
use serde::{Deserialize, Deserializer, Serialize};

/// Confirmation returned by a successful delete.
pub const BLOG_DELETED_MESSAGE: &str = "Blog Deleted!";

/// Request body for create and update.
///
/// Missing or `null` fields default to empty; unknown fields (including a
/// client `id` or `isPublished`) are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BlogPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "isPublished")]
    pub is_published: bool,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: blog.title,
            body: blog.body,
            is_published: blog.is_published,
        }
    }
}

/// Echo of an applied update: the path identifier plus the submitted fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatedBlogResponse {
    pub id: String,
    pub title: String,
    pub body: String,
}
