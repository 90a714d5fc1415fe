pub mod blogs;
pub mod health;
pub mod metrics;

pub use blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};
pub use health::{health_check, readiness_check};
pub use self::metrics::metrics;
