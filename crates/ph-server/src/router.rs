//! Axum router construction.
//!
//! Builds the full application router with the movie routes, middleware
//! layers, the OpenAPI document and optional static file serving.

use std::path::PathBuf;

use axum::middleware;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "phimhub", description = "Movie catalog API backed by OPhim"),
    paths(
        routes::health::health_check,
        routes::movies::home,
        routes::movies::detail,
        routes::movies::search,
        routes::movies::list,
        routes::movies::category,
        routes::movies::country,
        routes::movies::countries,
        routes::movies::categories,
        routes::movies::images,
        routes::movies::peoples,
        routes::movies::keywords,
    ),
    components(schemas(
        routes::health::HealthResponse,
        ph_core::MovieSummary,
        ph_core::MovieDetail,
        ph_core::MovieListResponse,
        ph_core::TaxonomyListResponse,
        ph_core::Taxonomy,
        ph_core::Pagination,
        ph_core::EpisodeServer,
        ph_core::EpisodeLink,
        ph_core::MovieImages,
        ph_core::MovieImage,
        ph_core::ImageUrls,
        ph_core::MoviePeoples,
        ph_core::Person,
        ph_core::ProfileUrls,
        ph_core::MovieKeywords,
        ph_core::Keyword,
        ph_core::CatalogRef,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut api = Router::new()
        .route("/movies", get(routes::movies::home))
        .route("/movies/countries", get(routes::movies::countries))
        .route("/movies/categories", get(routes::movies::categories))
        .route("/movies/search/:keyword", get(routes::movies::search))
        .route("/movies/list/:slug", get(routes::movies::list))
        .route("/movies/category/:slug", get(routes::movies::category))
        .route("/movies/country/:slug", get(routes::movies::country))
        .route("/movies/:slug", get(routes::movies::detail))
        .route("/movies/:slug/images", get(routes::movies::images))
        .route("/movies/:slug/peoples", get(routes::movies::peoples))
        .route("/movies/:slug/keywords", get(routes::movies::keywords));

    if let Some(limiter) = ctx.limiter.clone() {
        tracing::info!(
            "Rate limiting /api to {} requests per minute",
            ctx.config.server.requests_per_minute
        );
        api = api
            .layer(middleware::from_fn(rate_limit_middleware))
            .layer(Extension(limiter));
    }

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {}", dir.display());
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {} not found; not serving frontend", dir.display());
        }
    }

    app
}
