/// REST API handlers for group management
///
/// Groups are normally curated by operators; these endpoints stand in for
/// an admin surface. Deleting a group keeps its posts (their group
/// reference is nulled by the schema).
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::GroupService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GroupInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Create a group
pub async fn api_create_group(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    input: web::Json<GroupInput>,
) -> Result<HttpResponse> {
    input.validate()?;

    let service = GroupService::new((**pool).clone());
    let group = service
        .create(&input.title, &input.slug, &input.description)
        .await?;

    Ok(HttpResponse::Created().json(group))
}

/// Delete a group; its posts survive ungrouped
pub async fn api_delete_group(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    group_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    service.delete(*group_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_input_bounds_title_and_slug() {
        let input = GroupInput {
            title: "Travel".to_string(),
            slug: "travel".to_string(),
            description: String::new(),
        };
        assert!(input.validate().is_ok());

        let input = GroupInput {
            title: "t".repeat(101),
            slug: "travel".to_string(),
            description: String::new(),
        };
        assert!(input.validate().is_err());
    }
}
