pub mod blogs;

pub use blogs::{BlogPayload, BlogResponse, UpdatedBlogResponse, BLOG_DELETED_MESSAGE};
