/// Blog Service Library
///
/// Handles posts, groups, comments, and follows for the Quill blogging
/// platform, plus the paginated feeds assembled over them and the Redis
/// page cache in front of the global feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for the web surface and the REST API
/// - `models`: Data structures for users, groups, posts, comments, follows
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `cache`: Feed page caching
/// - `middleware`: HTTP middleware for authentication and request timing
/// - `auth`: JWT validation
/// - `pagination`: Fixed-size page arithmetic shared by every listing
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
