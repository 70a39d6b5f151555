/// Post handlers - the web surface's detail, create, and edit routes
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{CommentView, PostSummary};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Submitted post form; the author never comes from the request.
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Enter the text"))]
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostSummary,
    pub comments: Vec<CommentView>,
}

/// Single post with its comments, newest comment first
pub async fn post_detail(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let (post, comments) = service.get_detail(*post_id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse { post, comments }))
}

/// Create a new post authored by the authenticated user
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &form.text, form.group, form.image.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Edit a post; a non-author receives not-found, never the edit surface
pub async fn edit_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .edit_post(
            *post_id,
            user_id.0,
            &form.text,
            form.group,
            form.image.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_requires_text() {
        let form = PostForm {
            text: String::new(),
            group: None,
            image: None,
        };
        assert!(form.validate().is_err());

        let form = PostForm {
            text: "A post".to_string(),
            group: None,
            image: None,
        };
        assert!(form.validate().is_ok());
    }
}
