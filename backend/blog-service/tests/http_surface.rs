use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use blog_service::handlers;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// A pool that parses but never connects; auth rejects these requests
/// before any query runs.
fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/quill_test")
        .expect("lazy pool from a well-formed URL")
}

#[actix_web::test]
async fn unmapped_paths_get_the_themed_not_found_page() {
    let app = test::init_service(
        App::new()
            .route("/health/live", web::get().to(|| async { "ok" }))
            .default_service(web::route().to(handlers::not_found)),
    )
    .await;

    let req = test::TestRequest::get().uri("/fck").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["path"], "/fck");
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Ooops, something went wrong...");
}

#[actix_web::test]
async fn api_post_writes_require_a_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(lazy_pool()))
            .service(
                web::scope("/api").service(
                    web::resource("/posts").route(web::post().to(handlers::api_create_post)),
                ),
            ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(serde_json::json!({ "text": "hello" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn api_post_deletes_require_a_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(lazy_pool()))
            .service(web::scope("/api").service(
                web::resource("/posts/{post_id}").route(web::delete().to(handlers::api_delete_post)),
            )),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/api/posts/7b9c3f6e-2c4c-4f0b-9a2e-6f1d2b3c4d5e")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
