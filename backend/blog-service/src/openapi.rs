/// OpenAPI documentation for Quill Blog Service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill Blog Service API",
        version = "1.0.0",
        description = "Blogging platform service for posts, groups, comments, and follows. Exposes the paginated global, group, profile, and following feeds, a REST API over posts and users, and the cached global feed page.",
        contact(
            name = "Quill Team",
            email = "support@quill.dev"
        ),
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
        (url = "https://blog-api.quill.dev", description = "Production server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "feed", description = "Paginated post feeds"),
        (name = "posts", description = "Post creation, retrieval, editing, and deletion"),
        (name = "comments", description = "Comments attached to posts"),
        (name = "groups", description = "Group listing and per-group feeds"),
        (name = "profiles", description = "Author profiles and follow edges"),
        (name = "users", description = "Read-only user directory"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from the identity service"))
                        .build(),
                ),
            )
        }
    }
}
