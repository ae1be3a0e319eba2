//! `/api/movies` route handlers.
//!
//! Handlers validate path and query input, call the matching
//! [`ph_catalog::CatalogService`] operation and attach the endpoint's
//! user-facing failure message to any error.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use ph_catalog::ListFilters;
use ph_core::{
    DataResponse, MovieDetail, MovieImages, MovieKeywords, MovieListResponse, MoviePeoples,
    TaxonomyListResponse,
};

use crate::context::AppContext;
use crate::error::AppError;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const SLUG_REQUIRED: &str = "Slug là bắt buộc";
pub const KEYWORD_TOO_SHORT: &str = "Từ khóa tìm kiếm phải có ít nhất 2 ký tự";

pub const HOME_FAILED: &str = "Không thể lấy danh sách phim";
pub const DETAIL_FAILED: &str = "Không thể lấy chi tiết phim";
pub const SEARCH_FAILED: &str = "Không thể tìm kiếm phim";
pub const LIST_FAILED: &str = "Không thể lấy danh sách phim";
pub const CATEGORY_FAILED: &str = "Không thể lấy danh sách phim theo thể loại";
pub const COUNTRY_FAILED: &str = "Không thể lấy danh sách phim theo quốc gia";
pub const COUNTRIES_FAILED: &str = "Không thể lấy danh sách quốc gia";
pub const CATEGORIES_FAILED: &str = "Không thể lấy danh sách thể loại";
pub const IMAGES_FAILED: &str = "Không thể lấy hình ảnh phim";
pub const PEOPLES_FAILED: &str = "Không thể lấy thông tin diễn viên";
pub const KEYWORDS_FAILED: &str = "Không thể lấy từ khóa phim";

const DEFAULT_PAGE: u32 = 1;
const FALLBACK_LIMIT: u32 = 24;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Paging parameters. Values are kept as strings so malformed input falls
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size for search (default 24).
    pub limit: Option<String>,
}

/// Filters accepted by the filtered listing routes.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// e.g. `modified.time`, `_id`, `year`
    pub sort_field: Option<String>,
    /// `asc` or `desc`
    pub sort_type: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub year: Option<String>,
}

impl ListQuery {
    fn into_filters(self) -> ListFilters {
        ListFilters {
            page: parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(self.limit.as_deref()),
            sort_field: self.sort_field,
            sort_type: self.sort_type,
            category: self.category,
            country: self.country,
            year: self.year,
        }
    }
}

/// Parse a positive integer, treating garbage and zero as absent.
fn parse_positive(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}

/// Path segment as extracted by axum; rejections become JSON 400s.
type PathParam = Result<Path<String>, PathRejection>;

fn path_param(path: PathParam) -> Result<String, AppError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

fn require_slug(slug: &str) -> Result<&str, AppError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(AppError::bad_request(SLUG_REQUIRED));
    }
    Ok(slug)
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/movies
#[utoipa::path(
    get,
    path = "/api/movies",
    params(PageQuery),
    responses(
        (status = 200, description = "Home page listing", body = MovieListResponse),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn home(
    State(ctx): State<AppContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
    let resp = ctx
        .catalog
        .home(page)
        .await
        .map_err(AppError::during(HOME_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/search/{keyword}
#[utoipa::path(
    get,
    path = "/api/movies/search/{keyword}",
    params(("keyword" = String, Path, description = "Search keyword"), PageQuery),
    responses(
        (status = 200, description = "Search results", body = MovieListResponse),
        (status = 400, description = "Keyword too short"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn search(
    State(ctx): State<AppContext>,
    keyword: PathParam,
    Query(query): Query<PageQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let keyword = path_param(keyword)?;
    let keyword = keyword.trim();
    if keyword.chars().count() < ctx.config.search.min_keyword_chars {
        return Err(AppError::bad_request(KEYWORD_TOO_SHORT));
    }

    let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
    let default_limit = match ctx.config.search.default_limit {
        0 => FALLBACK_LIMIT,
        n => n,
    };
    let limit = parse_positive(query.limit.as_deref()).unwrap_or(default_limit);

    tracing::debug!(keyword, page, limit, "Searching catalog");
    let resp = ctx
        .catalog
        .search(keyword, page, limit)
        .await
        .map_err(AppError::during(SEARCH_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/list/{slug}
#[utoipa::path(
    get,
    path = "/api/movies/list/{slug}",
    params(("slug" = String, Path, description = "List slug, e.g. phim-moi"), ListQuery),
    responses(
        (status = 200, description = "Curated list", body = MovieListResponse),
        (status = 400, description = "Missing slug"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn list(
    State(ctx): State<AppContext>,
    slug: PathParam,
    Query(query): Query<ListQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .list(slug, &query.into_filters())
        .await
        .map_err(AppError::during(LIST_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/category/{slug}
#[utoipa::path(
    get,
    path = "/api/movies/category/{slug}",
    params(("slug" = String, Path, description = "Category slug"), ListQuery),
    responses(
        (status = 200, description = "Movies in the category", body = MovieListResponse),
        (status = 400, description = "Missing slug"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn category(
    State(ctx): State<AppContext>,
    slug: PathParam,
    Query(query): Query<ListQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .category(slug, &query.into_filters())
        .await
        .map_err(AppError::during(CATEGORY_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/country/{slug}
#[utoipa::path(
    get,
    path = "/api/movies/country/{slug}",
    params(("slug" = String, Path, description = "Country slug"), ListQuery),
    responses(
        (status = 200, description = "Movies from the country", body = MovieListResponse),
        (status = 400, description = "Missing slug"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn country(
    State(ctx): State<AppContext>,
    slug: PathParam,
    Query(query): Query<ListQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .country(slug, &query.into_filters())
        .await
        .map_err(AppError::during(COUNTRY_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/countries
#[utoipa::path(
    get,
    path = "/api/movies/countries",
    responses(
        (status = 200, description = "Country directory", body = TaxonomyListResponse),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn countries(
    State(ctx): State<AppContext>,
) -> Result<Json<TaxonomyListResponse>, AppError> {
    let resp = ctx
        .catalog
        .countries()
        .await
        .map_err(AppError::during(COUNTRIES_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/categories
#[utoipa::path(
    get,
    path = "/api/movies/categories",
    responses(
        (status = 200, description = "Category directory", body = TaxonomyListResponse),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn categories(
    State(ctx): State<AppContext>,
) -> Result<Json<TaxonomyListResponse>, AppError> {
    let resp = ctx
        .catalog
        .categories()
        .await
        .map_err(AppError::during(CATEGORIES_FAILED))?;
    Ok(Json(resp))
}

// ---------------------------------------------------------------------------
// Single movie
// ---------------------------------------------------------------------------

/// GET /api/movies/{slug}
#[utoipa::path(
    get,
    path = "/api/movies/{slug}",
    params(("slug" = String, Path, description = "Movie slug")),
    responses(
        (status = 200, description = "Movie detail with episodes", body = DataResponse<MovieDetail>),
        (status = 400, description = "Missing slug"),
        (status = 404, description = "Movie not found"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn detail(
    State(ctx): State<AppContext>,
    slug: PathParam,
) -> Result<Json<DataResponse<MovieDetail>>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .movie_by_slug(slug)
        .await
        .map_err(AppError::during(DETAIL_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/{slug}/images
#[utoipa::path(
    get,
    path = "/api/movies/{slug}/images",
    params(("slug" = String, Path, description = "Movie slug")),
    responses(
        (status = 200, description = "TMDB artwork", body = DataResponse<MovieImages>),
        (status = 400, description = "Missing slug"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn images(
    State(ctx): State<AppContext>,
    slug: PathParam,
) -> Result<Json<DataResponse<MovieImages>>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .images(slug)
        .await
        .map_err(AppError::during(IMAGES_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/{slug}/peoples
#[utoipa::path(
    get,
    path = "/api/movies/{slug}/peoples",
    params(("slug" = String, Path, description = "Movie slug")),
    responses(
        (status = 200, description = "Cast and crew", body = DataResponse<MoviePeoples>),
        (status = 400, description = "Missing slug"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn peoples(
    State(ctx): State<AppContext>,
    slug: PathParam,
) -> Result<Json<DataResponse<MoviePeoples>>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .peoples(slug)
        .await
        .map_err(AppError::during(PEOPLES_FAILED))?;
    Ok(Json(resp))
}

/// GET /api/movies/{slug}/keywords
#[utoipa::path(
    get,
    path = "/api/movies/{slug}/keywords",
    params(("slug" = String, Path, description = "Movie slug")),
    responses(
        (status = 200, description = "TMDB keywords", body = DataResponse<MovieKeywords>),
        (status = 400, description = "Missing slug"),
        (status = 500, description = "Upstream failure")
    )
)]
pub async fn keywords(
    State(ctx): State<AppContext>,
    slug: PathParam,
) -> Result<Json<DataResponse<MovieKeywords>>, AppError> {
    let slug = path_param(slug)?;
    let slug = require_slug(&slug)?;
    let resp = ctx
        .catalog
        .keywords(slug)
        .await
        .map_err(AppError::during(KEYWORDS_FAILED))?;
    Ok(Json(resp))
}
