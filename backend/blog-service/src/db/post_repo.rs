use crate::models::{Post, PostSummary};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const SUMMARY_COLUMNS: &str = r#"
    p.id, p.text, p.created_at, p.author_id, u.username AS author_username,
    p.group_id, g.title AS group_title, g.slug AS group_slug, p.image
"#;

/// Create a new post; the author comes from the authenticated identity
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (text, author_id, group_id, image)
        VALUES ($1, $2, $3, $4)
        RETURNING id, text, created_at, author_id, group_id, image
        "#,
    )
    .bind(text)
    .bind(author_id)
    .bind(group_id)
    .bind(image)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, text, created_at, author_id, group_id, image
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID joined with its author and group
pub async fn find_post_summary(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostSummary>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.id = $1
        "#
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Update text/group/image on a post, but only for its author.
///
/// Returns `None` when the post does not exist or the caller is not the
/// author; the row is untouched either way. `created_at` is never written.
pub async fn update_post_by_author(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $1, group_id = $2, image = $3
        WHERE id = $4 AND author_id = $5
        RETURNING id, text, created_at, author_id, group_id, image
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(post_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Delete a post, but only for its author; returns whether a row went away
pub async fn delete_post_by_author(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = $1 AND author_id = $2
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count all posts
pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// All posts, newest-first
pub async fn list_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts in a group
pub async fn count_by_group(pool: &PgPool, group_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Posts in a group, newest-first
pub async fn list_by_group(
    pool: &PgPool,
    group_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.group_id = $1
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts by an author
pub async fn count_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Posts by an author, newest-first
pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.author_id = $1
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts whose author the given user follows
pub async fn count_followed(pool: &PgPool, follower_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count
        FROM posts p
        JOIN follows f ON f.author_id = p.author_id
        WHERE f.follower_id = $1
        "#,
    )
    .bind(follower_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Posts whose author the given user follows, newest-first
pub async fn list_followed(
    pool: &PgPool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        JOIN follows f ON f.author_id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE f.follower_id = $1
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(follower_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// All posts as bare rows, newest-first (REST list surface)
pub async fn list_rows(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, text, created_at, author_id, group_id, image
        FROM posts
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
