mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, ImageStorageMode, StoreBackend};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::middleware;
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::designs::{routes as designs_routes, DesignService};
use crate::modules::images::{DataUriImageStore, DiskImageStore, ImageStore};
use crate::modules::store::{GalleryStore, MemoryStore, PostgresStore};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Select the store backend
    let store: Arc<dyn GalleryStore> = match config.storage.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store (state is lost on restart)");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres => {
            let db_config = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Postgres backend selected without database config"))?;

            let store = PostgresStore::connect(db_config).await?;
            tracing::info!("Database connection pool created and migrations applied");

            Arc::new(store)
        }
    };

    // Select image storage; disk mode also serves the uploads directory
    let (images, uploads_route): (Arc<dyn ImageStore>, Option<Router>) =
        match config.storage.image_mode {
            ImageStorageMode::Disk => {
                let disk = DiskImageStore::new(&config.storage.upload_dir);
                disk.ensure_dir()
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to prepare upload directory: {}", e))?;
                tracing::info!("Images stored on disk under {}", config.storage.upload_dir);

                let serve = Router::new()
                    .nest_service("/uploads", ServeDir::new(&config.storage.upload_dir));
                (Arc::new(disk), Some(serve))
            }
            ImageStorageMode::DataUri => {
                tracing::info!("Images embedded as data URIs");
                (Arc::new(DataUriImageStore), None)
            }
        };

    // Initialize services
    let category_service = Arc::new(CategoryService::new(store.clone()));
    let design_service = Arc::new(DesignService::new(store.clone(), images));
    let admin_service = Arc::new(AdminService::new(store.clone()));
    tracing::info!("Services initialized");

    // Seed default categories at boot; existing names are kept
    category_service
        .seed_defaults()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed categories: {}", e))?;
    tracing::info!("Default categories seeded");

    // Build swagger router with dynamic info
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(categories_routes(category_service))
        .merge(designs_routes(design_service))
        .merge(admin_routes(admin_service));

    let mut app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route);

    if let Some(uploads) = uploads_route {
        app = app.merge(uploads);
    }

    let app = app
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
