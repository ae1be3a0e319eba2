//! OPhim API client.
//!
//! Thin `reqwest` wrapper: one shared connection pool, browser-like default
//! headers and a request timeout. Every failure is reported as
//! [`Error::Upstream`]; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA,
};
use serde::de::DeserializeOwned;

use ph_core::config::UpstreamConfig;
use ph_core::{Error, Result};

use crate::source::{CatalogSource, ListFilters};
use crate::upstream::{
    DetailEnvelope, ImagesData, KeywordsData, ListEnvelope, MetaEnvelope, PeoplesData,
    TaxonomyEnvelope,
};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OphimClient {
    http: reqwest::Client,
    base_url: String,
}

impl OphimClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| Error::Config(format!("invalid upstream.accept_language: {e}")))?,
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, ?query, "OPhim request");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("request to {path} failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(Error::upstream(format!("{path} returned {status}")));
        }

        resp.json::<T>()
            .await
            .map_err(|e| Error::upstream(format!("invalid response from {path}: {e}")))
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

// ---------------------------------------------------------------------------
// CatalogSource
// ---------------------------------------------------------------------------

#[async_trait]
impl CatalogSource for OphimClient {
    fn name(&self) -> &'static str {
        "ophim"
    }

    async fn home(&self, page: u32) -> Result<ListEnvelope> {
        self.get("/v1/api/home", &[("page", page.to_string())]).await
    }

    async fn movie(&self, slug: &str) -> Result<DetailEnvelope> {
        self.get(&format!("/phim/{}", segment(slug)), &[]).await
    }

    async fn search(&self, keyword: &str, page: u32, limit: u32) -> Result<ListEnvelope> {
        self.get(
            "/v1/api/tim-kiem",
            &[
                ("keyword", keyword.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn list(&self, slug: &str, filters: &ListFilters) -> Result<ListEnvelope> {
        self.get(
            &format!("/v1/api/danh-sach/{}", segment(slug)),
            &filters.to_query(),
        )
        .await
    }

    async fn category(&self, slug: &str, filters: &ListFilters) -> Result<ListEnvelope> {
        self.get(
            &format!("/v1/api/the-loai/{}", segment(slug)),
            &filters.to_query(),
        )
        .await
    }

    async fn country(&self, slug: &str, filters: &ListFilters) -> Result<ListEnvelope> {
        self.get(
            &format!("/v1/api/quoc-gia/{}", segment(slug)),
            &filters.to_query(),
        )
        .await
    }

    async fn countries(&self) -> Result<TaxonomyEnvelope> {
        self.get("/v1/api/quoc-gia", &[]).await
    }

    async fn categories(&self) -> Result<TaxonomyEnvelope> {
        self.get("/v1/api/the-loai", &[]).await
    }

    async fn images(&self, slug: &str) -> Result<MetaEnvelope<ImagesData>> {
        self.get(&format!("/v1/api/phim/{}/images", segment(slug)), &[])
            .await
    }

    async fn peoples(&self, slug: &str) -> Result<MetaEnvelope<PeoplesData>> {
        self.get(&format!("/v1/api/phim/{}/peoples", segment(slug)), &[])
            .await
    }

    async fn keywords(&self, slug: &str) -> Result<MetaEnvelope<KeywordsData>> {
        self.get(&format!("/v1/api/phim/{}/keywords", segment(slug)), &[])
            .await
    }
}
