//! The upstream catalog abstraction.
//!
//! [`CatalogSource`] has one method per upstream call. The production
//! implementation is [`crate::OphimClient`]; tests plug in canned sources.

use async_trait::async_trait;

use ph_core::Result;

use crate::upstream::{
    DetailEnvelope, ImagesData, KeywordsData, ListEnvelope, MetaEnvelope, PeoplesData,
    TaxonomyEnvelope,
};

/// Query parameters for the filtered listing endpoints
/// (`danh-sach`, `the-loai`, `quoc-gia`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    pub page: u32,
    pub limit: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_type: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub year: Option<String>,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            sort_field: None,
            sort_type: None,
            category: None,
            country: None,
            year: None,
        }
    }
}

impl ListFilters {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Query pairs to send upstream. Unset and blank filters are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string())];
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        for (key, value) in [
            ("sort_field", &self.sort_field),
            ("sort_type", &self.sort_type),
            ("category", &self.category),
            ("country", &self.country),
            ("year", &self.year),
        ] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                query.push((key, v.to_string()));
            }
        }
        query
    }
}

/// Async trait implemented by every catalog backend.
///
/// Methods return the raw upstream envelopes; reshaping happens in
/// [`crate::CatalogService`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short, lowercase identifier for this source (e.g. `"ophim"`).
    fn name(&self) -> &'static str;

    /// Home listing (`/v1/api/home`).
    async fn home(&self, page: u32) -> Result<ListEnvelope>;

    /// Movie detail (`/phim/{slug}`).
    async fn movie(&self, slug: &str) -> Result<DetailEnvelope>;

    /// Keyword search (`/v1/api/tim-kiem`).
    async fn search(&self, keyword: &str, page: u32, limit: u32) -> Result<ListEnvelope>;

    /// Curated list such as `phim-moi` or `phim-bo` (`/v1/api/danh-sach/{slug}`).
    async fn list(&self, slug: &str, filters: &ListFilters) -> Result<ListEnvelope>;

    /// Movies in a category (`/v1/api/the-loai/{slug}`).
    async fn category(&self, slug: &str, filters: &ListFilters) -> Result<ListEnvelope>;

    /// Movies from a country (`/v1/api/quoc-gia/{slug}`).
    async fn country(&self, slug: &str, filters: &ListFilters) -> Result<ListEnvelope>;

    /// Country directory (`/v1/api/quoc-gia`).
    async fn countries(&self) -> Result<TaxonomyEnvelope>;

    /// Category directory (`/v1/api/the-loai`).
    async fn categories(&self) -> Result<TaxonomyEnvelope>;

    /// TMDB artwork (`/v1/api/phim/{slug}/images`).
    async fn images(&self, slug: &str) -> Result<MetaEnvelope<ImagesData>>;

    /// TMDB cast and crew (`/v1/api/phim/{slug}/peoples`).
    async fn peoples(&self, slug: &str) -> Result<MetaEnvelope<PeoplesData>>;

    /// TMDB keywords (`/v1/api/phim/{slug}/keywords`).
    async fn keywords(&self, slug: &str) -> Result<MetaEnvelope<KeywordsData>>;
}
