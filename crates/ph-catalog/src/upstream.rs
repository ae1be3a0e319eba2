//! OPhim wire types.
//!
//! Deserialize-only. Fields are optional and scalars are coerced through
//! [`ph_core::lenient`]. OPhim mirrors disagree about where the detail movie
//! lives, so [`DetailEnvelope`] resolves several envelope shapes.

use serde::Deserialize;
use serde_json::Value;

use ph_core::lenient;
use ph_core::{EpisodeServer, Pagination, Result, Taxonomy};

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// TMDB block embedded in an OPhim movie.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTmdb {
    #[serde(rename = "type", deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    pub season: Option<Value>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub vote_average: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub vote_count: Option<u64>,
}

/// A movie as sent by OPhim, in both listings and the detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    #[serde(rename = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub origin_name: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub alternative_names: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    pub tmdb: Option<RawTmdb>,
    pub imdb: Option<Value>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub year: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub poster_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub thumb_url: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub category: Vec<Taxonomy>,
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub country: Vec<Taxonomy>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub quality: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub lang: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub lang_key: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub episode_current: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub episode_total: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub view: Option<u64>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub actor: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub director: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub trailer_url: Option<String>,
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub episodes: Vec<EpisodeServer>,
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// `{ data: { items, params: { pagination }, APP_DOMAIN_CDN_IMAGE } }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListEnvelope {
    pub data: Option<ListData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListData {
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub items: Vec<RawMovie>,
    pub params: Option<ListParams>,
    #[serde(rename = "APP_DOMAIN_CDN_IMAGE", deserialize_with = "lenient::opt_string")]
    pub cdn_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub pagination: Option<Pagination>,
}

impl ListEnvelope {
    /// Split into items, pagination and the announced image CDN.
    pub fn into_parts(self) -> (Vec<RawMovie>, Pagination, Option<String>) {
        let data = self.data.unwrap_or_default();
        let pagination = data
            .params
            .and_then(|p| p.pagination)
            .unwrap_or_default();
        (data.items, pagination, data.cdn_image)
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Raw body of `/phim/{slug}`.
///
/// Known shapes:
/// - `{ status, msg, movie: {...}, episodes: [...] }`
/// - `{ status, message, data: { item: {..., episodes: [...]} } }`
/// - `{ data: { movie: {...}, episodes: [...] } }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DetailEnvelope(pub Value);

impl DetailEnvelope {
    /// Locate the movie object and its episode servers.
    ///
    /// Returns `Ok(None)` when no candidate is a JSON object (OPhim answers an
    /// unknown slug with `movie: []` or no movie at all). Episodes come from
    /// the first non-empty source, movie-embedded first.
    pub fn resolve(self) -> Result<Option<(RawMovie, Vec<EpisodeServer>)>> {
        let body = self.0;
        let data = body.get("data");

        let candidate = [
            data.and_then(|d| d.get("item")),
            data.and_then(|d| d.get("movie")),
            body.get("movie"),
        ]
        .into_iter()
        .flatten()
        .find(|v| v.is_object());

        let Some(movie_value) = candidate else {
            return Ok(None);
        };

        let mut movie: RawMovie = serde_json::from_value(movie_value.clone())
            .map_err(|e| ph_core::Error::upstream(format!("invalid movie payload: {e}")))?;

        let episodes = if movie.episodes.is_empty() {
            [data.and_then(|d| d.get("episodes")), body.get("episodes")]
                .into_iter()
                .flatten()
                .map(parse_episodes)
                .find(|e| !e.is_empty())
                .unwrap_or_default()
        } else {
            std::mem::take(&mut movie.episodes)
        };

        Ok(Some((movie, episodes)))
    }
}

fn parse_episodes(value: &Value) -> Vec<EpisodeServer> {
    match serde_json::from_value::<Vec<EpisodeServer>>(value.clone()) {
        Ok(servers) => servers,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed episode list");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Directories (countries, categories)
// ---------------------------------------------------------------------------

/// Body of `/v1/api/quoc-gia` and `/v1/api/the-loai`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaxonomyEnvelope {
    pub data: Option<TaxonomyData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaxonomyData {
    /// `data: [...]`
    List(Vec<Taxonomy>),
    /// `data: { items: [...] }`
    Items { items: Vec<Taxonomy> },
    /// `data: { data: [...] }`
    Nested { data: Vec<Taxonomy> },
    Other(Value),
}

impl TaxonomyEnvelope {
    pub fn into_items(self) -> Vec<Taxonomy> {
        match self.data {
            Some(TaxonomyData::List(items))
            | Some(TaxonomyData::Items { items })
            | Some(TaxonomyData::Nested { data: items }) => items,
            Some(TaxonomyData::Other(_)) | None => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// TMDB-sourced metadata
// ---------------------------------------------------------------------------

/// `{ success, data }` wrapper used by the images/peoples/keywords endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRef {
    pub tmdb_id: Option<Value>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub tmdb_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub ophim_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub width: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub height: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub aspect_ratio: Option<f64>,
    #[serde(rename = "type", deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImagesData {
    #[serde(flatten)]
    pub reference: RawRef,
    pub image_sizes: Option<Value>,
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPerson {
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub tmdb_people_id: Option<u64>,
    pub adult: Option<bool>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub gender: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub gender_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub original_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub character: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub known_for_department: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeoplesData {
    #[serde(flatten)]
    pub reference: RawRef,
    pub profile_sizes: Option<Value>,
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub peoples: Vec<RawPerson>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawKeyword {
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub tmdb_keyword_id: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name_vn: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeywordsData {
    #[serde(flatten)]
    pub reference: RawRef,
    #[serde(deserialize_with = "lenient::vec_or_empty")]
    pub keywords: Vec<RawKeyword>,
}
