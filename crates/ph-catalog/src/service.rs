//! Catalog service: one operation per REST endpoint.
//!
//! Wraps a [`CatalogSource`], reshapes its envelopes with [`crate::transform`]
//! and resolves image URLs against the configured CDNs.

use std::sync::Arc;

use ph_core::config::ImageConfig;
use ph_core::{
    DataResponse, Error, MovieDetail, MovieImages, MovieKeywords, MovieListResponse,
    MoviePeoples, Result, TaxonomyListResponse, STATUS_SUCCESS,
};

use crate::source::{CatalogSource, ListFilters};
use crate::transform::{
    apply_image_urls, transform_image, transform_keyword, transform_movie,
    transform_movie_detail, transform_person, transform_ref,
};
use crate::upstream::{ListEnvelope, MetaEnvelope};

pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    images: ImageConfig,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>, images: ImageConfig) -> Self {
        Self { source, images }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    /// Home page listing. Uses the CDN announced by the upstream when present.
    pub async fn home(&self, page: u32) -> Result<MovieListResponse> {
        let envelope = self.source.home(page).await?;
        let (items, pagination, announced) = envelope.into_parts();
        let cdn = announced.unwrap_or_else(|| self.images.cdn_base_url.clone());
        tracing::debug!(page, count = items.len(), %cdn, "Home listing");

        let items = items
            .into_iter()
            .map(|raw| {
                let mut movie = transform_movie(raw);
                apply_image_urls(&mut movie, &cdn);
                movie
            })
            .collect();

        Ok(MovieListResponse {
            status: STATUS_SUCCESS.to_string(),
            items,
            pagination,
            cdn_image_url: Some(cdn),
        })
    }

    pub async fn search(&self, keyword: &str, page: u32, limit: u32) -> Result<MovieListResponse> {
        let envelope = self.source.search(keyword, page, limit).await?;
        Ok(self.listing(envelope))
    }

    pub async fn list(&self, slug: &str, filters: &ListFilters) -> Result<MovieListResponse> {
        let envelope = self.source.list(slug, filters).await?;
        Ok(self.listing(envelope))
    }

    pub async fn category(&self, slug: &str, filters: &ListFilters) -> Result<MovieListResponse> {
        let envelope = self.source.category(slug, filters).await?;
        Ok(self.listing(envelope))
    }

    pub async fn country(&self, slug: &str, filters: &ListFilters) -> Result<MovieListResponse> {
        let envelope = self.source.country(slug, filters).await?;
        Ok(self.listing(envelope))
    }

    fn listing(&self, envelope: ListEnvelope) -> MovieListResponse {
        let (items, pagination, _) = envelope.into_parts();
        let cdn = &self.images.cdn_base_url;
        let items = items
            .into_iter()
            .map(|raw| {
                let mut movie = transform_movie(raw);
                apply_image_urls(&mut movie, cdn);
                movie
            })
            .collect();

        MovieListResponse {
            status: STATUS_SUCCESS.to_string(),
            items,
            pagination,
            cdn_image_url: None,
        }
    }

    pub async fn countries(&self) -> Result<TaxonomyListResponse> {
        let items = self.source.countries().await?.into_items();
        Ok(TaxonomyListResponse {
            status: STATUS_SUCCESS.to_string(),
            items,
        })
    }

    pub async fn categories(&self) -> Result<TaxonomyListResponse> {
        let items = self.source.categories().await?.into_items();
        Ok(TaxonomyListResponse {
            status: STATUS_SUCCESS.to_string(),
            items,
        })
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    pub async fn movie_by_slug(&self, slug: &str) -> Result<DataResponse<MovieDetail>> {
        let envelope = self.source.movie(slug).await?;
        let Some((raw, episodes)) = envelope.resolve()? else {
            tracing::debug!(slug, "Upstream has no movie for slug");
            return Err(Error::movie_not_found());
        };

        let mut movie = transform_movie_detail(raw);
        if let Err(e) = movie.validate() {
            tracing::warn!(slug, error = %e, "Discarding incomplete movie record");
            return Err(Error::movie_not_found());
        }
        apply_image_urls(&mut movie.summary, &self.images.cdn_base_url);
        movie.episodes = episodes;

        Ok(DataResponse::success(movie))
    }

    // -----------------------------------------------------------------------
    // TMDB-sourced metadata
    // -----------------------------------------------------------------------

    pub async fn images(&self, slug: &str) -> Result<DataResponse<MovieImages>> {
        let data = successful(self.source.images(slug).await?, "images")?;
        let tmdb = &self.images.tmdb_base_url;

        let images: Vec<_> = data
            .images
            .into_iter()
            .filter_map(|raw| transform_image(raw, tmdb))
            .collect();
        let of_kind = |kind: &str| {
            images
                .iter()
                .filter(|img| img.kind.as_deref() == Some(kind))
                .cloned()
                .collect::<Vec<_>>()
        };
        let backdrops = of_kind("backdrop");
        let posters = of_kind("poster");

        Ok(DataResponse::success(MovieImages {
            reference: transform_ref(data.reference),
            image_sizes: data.image_sizes,
            images,
            backdrops,
            posters,
        }))
    }

    pub async fn peoples(&self, slug: &str) -> Result<DataResponse<MoviePeoples>> {
        let data = successful(self.source.peoples(slug).await?, "peoples")?;
        let tmdb = &self.images.tmdb_base_url;

        let peoples: Vec<_> = data
            .peoples
            .into_iter()
            .map(|raw| transform_person(raw, tmdb))
            .collect();
        let (cast, crew): (Vec<_>, Vec<_>) = peoples.iter().cloned().partition(|p| p.is_cast());

        Ok(DataResponse::success(MoviePeoples {
            reference: transform_ref(data.reference),
            profile_sizes: data.profile_sizes,
            peoples,
            cast,
            crew,
        }))
    }

    pub async fn keywords(&self, slug: &str) -> Result<DataResponse<MovieKeywords>> {
        let data = successful(self.source.keywords(slug).await?, "keywords")?;

        Ok(DataResponse::success(MovieKeywords {
            reference: transform_ref(data.reference),
            keywords: data.keywords.into_iter().map(transform_keyword).collect(),
        }))
    }
}

/// Unwrap a `{success, data}` envelope, rejecting unsuccessful or empty ones.
fn successful<T>(envelope: MetaEnvelope<T>, what: &str) -> Result<T> {
    match envelope {
        MetaEnvelope {
            success: true,
            data: Some(data),
        } => Ok(data),
        MetaEnvelope { success: true, .. } => {
            Err(Error::upstream(format!("{what} response has no data")))
        }
        _ => Err(Error::upstream(format!("{what} request was not successful"))),
    }
}
