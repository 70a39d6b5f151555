/// HTTP handlers for blog-service
///
/// This module contains handlers for:
/// - The web surface: feeds, group pages, profiles, post detail, forms
/// - The REST API: post CRUD, read-only users, group management
///
/// Route tables live in `main.rs`; handlers stay thin and delegate to the
/// services layer.
use actix_web::{HttpRequest, HttpResponse};

pub mod api_groups;
pub mod api_posts;
pub mod api_users;
pub mod cache_admin;
pub mod comments;
pub mod feed;
pub mod groups;
pub mod posts;
pub mod profiles;

// Re-export handler functions at module level
pub use api_groups::{api_create_group, api_delete_group};
pub use api_posts::{
    api_create_post, api_delete_post, api_get_post, api_list_posts, api_update_post,
};
pub use api_users::{api_get_user, api_list_users};
pub use cache_admin::clear_feed_cache;
pub use comments::add_comment;
pub use feed::{following_feed, global_feed};
pub use groups::{group_feed, list_groups};
pub use posts::{create_post, edit_post, post_detail};
pub use profiles::{follow_author, profile, unfollow_author};

/// Themed not-found response for any unmapped path
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Ooops, something went wrong...",
        "path": req.path(),
        "status": 404,
    }))
}
