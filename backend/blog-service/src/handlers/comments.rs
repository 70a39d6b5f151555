/// Comment handlers - attaching replies to posts
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::CommentService;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Submitted comment form; comments are bounded at 400 characters.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 400, message = "Enter a comment of at most 400 characters"))]
    pub text: String,
}

/// Add a comment to a post, then send the client back to the post detail
/// page the way the form surface expects.
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = CommentService::new((**pool).clone());
    service.add_comment(*post_id, user_id.0, &form.text).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/posts/{}", post_id)))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_form_bounds_length_at_400() {
        let form = CommentForm {
            text: "a".repeat(400),
        };
        assert!(form.validate().is_ok());

        let form = CommentForm {
            text: "a".repeat(401),
        };
        assert!(form.validate().is_err());

        let form = CommentForm {
            text: String::new(),
        };
        assert!(form.validate().is_err());
    }
}
