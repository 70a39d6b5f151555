use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use blog_service::cache::FeedPageCache;
use blog_service::{auth, db, handlers, middleware, openapi::ApiDoc};
use redis::aio::ConnectionManager;
use redis::RedisError;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
    redis: ConnectionManager,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }

    async fn check_redis(&self) -> Result<(), RedisError> {
        let mut conn = self.redis.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(RedisError::from((
                redis::ErrorKind::ResponseError,
                "unexpected PING response",
            )))
        }
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let postgres_ok = state.check_postgres().await.is_ok();
    // Redis being down degrades the feed cache but does not stop serving.
    let redis_ok = state.check_redis().await.is_ok();

    let response = serde_json::json!({
        "ready": postgres_ok,
        "checks": {
            "postgresql": if postgres_ok { "healthy" } else { "unhealthy" },
            "redis": if redis_ok { "healthy" } else { "degraded" },
        }
    });

    if postgres_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    match auth::load_validation_key() {
        Ok(public_key) => {
            if let Err(err) = auth::initialize_validation_key(&public_key) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT validation key: {err}"),
                ));
            }
        }
        Err(err) => {
            tracing::warn!(
                "JWT public key not configured ({err}); authenticated routes will reject requests"
            );
        }
    }

    // Initialize database connection pool
    let db_pool = match db::connect_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migration failed: {e}")))?;

    tracing::info!("Connected to database, migrations applied");

    // Initialize the Redis-backed feed page cache
    let redis_client = redis::Client::open(config.cache.url.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Invalid Redis URL: {e}")))?;
    let redis_manager = ConnectionManager::new(redis_client).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize Redis connection: {e}"),
        )
    })?;

    let feed_cache = Arc::new(FeedPageCache::new(
        redis_manager.clone(),
        config.cache.feed_ttl_secs,
    ));

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
        redis: redis_manager,
    });
    let feed_cache_data = web::Data::new(feed_cache);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api/openapi.json", openapi_doc.clone()),
            )
            .route("/api/openapi.json", web::get().to(openapi_json))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(feed_cache_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::RequestTimingMiddleware)
            // Health check endpoints
            .route("/health", web::get().to(health_summary))
            .route("/health/ready", web::get().to(readiness_summary))
            .route("/health/live", web::get().to(liveness_check))
            // Global feed: public, cached
            .route("/", web::get().to(handlers::global_feed))
            // REST API: public reads, identity-gated writes
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(handlers::api_list_posts))
                            .route(web::post().to(handlers::api_create_post)),
                    )
                    .service(
                        web::resource("/posts/{post_id}")
                            .route(web::get().to(handlers::api_get_post))
                            .route(web::put().to(handlers::api_update_post))
                            .route(web::patch().to(handlers::api_update_post))
                            .route(web::delete().to(handlers::api_delete_post)),
                    )
                    .service(
                        web::resource("/groups").route(web::post().to(handlers::api_create_group)),
                    )
                    .service(
                        web::resource("/groups/{group_id}")
                            .route(web::delete().to(handlers::api_delete_group)),
                    )
                    .service(web::resource("/users").route(web::get().to(handlers::api_list_users)))
                    .service(
                        web::resource("/users/{user_id}")
                            .route(web::get().to(handlers::api_get_user)),
                    ),
            )
            // Web surface: anonymous visitors are redirected to login
            .service(
                web::scope("/groups")
                    .wrap(middleware::JwtAuthMiddleware)
                    .route("", web::get().to(handlers::list_groups))
                    .route("/{slug}", web::get().to(handlers::group_feed)),
            )
            .service(
                web::scope("/follow")
                    .wrap(middleware::JwtAuthMiddleware)
                    .route("", web::get().to(handlers::following_feed)),
            )
            .service(
                web::scope("/posts")
                    .wrap(middleware::JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_post))
                    .route("/{post_id}", web::get().to(handlers::post_detail))
                    .route("/{post_id}", web::put().to(handlers::edit_post))
                    .route("/{post_id}/comments", web::post().to(handlers::add_comment)),
            )
            .service(
                web::scope("/profiles")
                    .wrap(middleware::JwtAuthMiddleware)
                    .route("/{username}", web::get().to(handlers::profile))
                    .route("/{username}/follow", web::post().to(handlers::follow_author))
                    .route(
                        "/{username}/unfollow",
                        web::post().to(handlers::unfollow_author),
                    ),
            )
            .service(
                web::scope("/cache")
                    .wrap(middleware::JwtAuthMiddleware)
                    .route("/clear", web::post().to(handlers::clear_feed_cache)),
            )
            // Anything unmapped gets the themed not-found page
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
