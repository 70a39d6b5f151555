/// Data models for blog-service
///
/// This module defines structures for:
/// - User: platform identity (created by the external signup flow)
/// - Group: a named category posts may optionally belong to
/// - Post: a user-authored text entry, optionally grouped and illustrated
/// - Comment: a short text reply attached to a post
/// - Follow: a directed subscription edge between users
///
/// Row structs map 1:1 onto the tables in `migrations/`; the `*View`
/// structs are join projections used by the feed and detail surfaces.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - identity with a unique username
///
/// Accounts are created by the external signup flow and never deleted by
/// this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Group entity - a named category for posts
///
/// The slug is a human-readable identifier and is not guaranteed unique.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Post entity - a user-authored text entry
///
/// `created_at` is assigned once by the database and never updated.
/// `group_id` is nulled out when the group is deleted; deleting the author
/// cascades to the post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
}

/// Comment entity - a bounded text reply on a post
///
/// `post_id` is nullable in the schema but always set by the service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Option<Uuid>,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Follow entity - a directed edge from a follower to a followed author
///
/// At most one edge exists per (follower, author) pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Feed projection of a post joined with its author and group
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub group_id: Option<Uuid>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
    pub image: Option<String>,
}

/// Detail projection of a comment joined with its author
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Option<Uuid>,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
