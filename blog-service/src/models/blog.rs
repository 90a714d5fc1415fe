use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A blog post as stored in the `blogs` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    /// Assigned by MongoDB on insert; `None` only before the first write.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "isPublished", default)]
    pub is_published: bool,
}

impl Blog {
    /// A new, unpublished post without an identifier.
    pub fn draft(title: String, body: String) -> Self {
        Self {
            id: None,
            title,
            body,
            is_published: false,
        }
    }
}
