use crate::models::Follow;
use sqlx::PgPool;
use uuid::Uuid;

/// Idempotent follow insert; returns the new edge, or `None` when it
/// already existed.
///
/// The (follower_id, author_id) pair is unique in the schema, so a repeat
/// follow hits the conflict arm and inserts nothing.
pub async fn insert_follow(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<Option<Follow>, sqlx::Error> {
    let inserted = sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (id, follower_id, author_id, created_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (follower_id, author_id) DO NOTHING
        RETURNING id, follower_id, author_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(follower_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted)
}

/// Idempotent unfollow; returns true if an edge was removed.
pub async fn delete_follow(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND author_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Whether an edge exists from follower to author
pub async fn is_following(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists = sqlx::query_as::<_, (bool,)>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM follows WHERE follower_id = $1 AND author_id = $2
        )
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(exists.0)
}
