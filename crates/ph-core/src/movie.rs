//! Movie data-transfer objects returned by the HTTP API.
//!
//! These mirror the upstream catalog schema renamed to camelCase for the
//! frontend. A few fields keep their snake_case upstream names
//! (`episode_current`, `trailer_url`, the episode server list) because the
//! player and the detail page read them under those names.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lenient;
use crate::{Error, Result};

/// Value of the `status` field on every successful response.
pub const STATUS_SUCCESS: &str = "success";

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// A category or country reference attached to a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Taxonomy {
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub slug: Option<String>,
}

/// A movie as it appears in listings (home, search, category, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: Option<String>,
    pub slug: String,
    pub title: String,
    pub original_title: Option<String>,
    pub alternative_names: Vec<String>,
    pub description: String,
    pub rating: f64,
    pub year: Option<i64>,
    /// Absolute poster URL once CDN prefixing has been applied.
    pub poster_path: Option<String>,
    /// Absolute thumbnail URL once CDN prefixing has been applied.
    pub thumb_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Vec<Taxonomy>,
    pub country: Vec<Taxonomy>,
    pub quality: Option<String>,
    pub lang: Option<String>,
    #[serde(rename = "episode_current")]
    pub episode_current: Option<String>,
    #[serde(rename = "episode_total")]
    pub episode_total: Option<String>,
}

/// Pagination block copied from the upstream listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(
        default,
        deserialize_with = "lenient::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_items: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_items_per_page: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_page: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_ranges: Option<u64>,
}

/// `{status, items, pagination, cdnImageUrl?}` returned by every listing route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieListResponse {
    pub status: String,
    pub items: Vec<MovieSummary>,
    pub pagination: Pagination,
    /// Only present on the home listing, where the upstream announces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_image_url: Option<String>,
}

/// `{status, items}` for the country and category directories.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaxonomyListResponse {
    pub status: String,
    pub items: Vec<Taxonomy>,
}

/// `{status, data}` wrapper for single-object responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data,
        }
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// One playable episode on a streaming server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EpisodeLink {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub link_embed: Option<String>,
    /// HLS playlist consumed by the frontend player.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub link_m3u8: Option<String>,
}

/// A streaming server and its episode list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EpisodeServer {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub server_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub server_data: Vec<EpisodeLink>,
}

/// Full movie record for the detail and watch pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub rating_count: u64,
    #[schema(value_type = Object)]
    pub imdb: Option<serde_json::Value>,
    pub status: Option<String>,
    pub lang_key: Vec<String>,
    pub time: Option<String>,
    pub view: u64,
    pub actor: Vec<String>,
    pub director: Vec<String>,
    #[serde(rename = "trailer_url")]
    pub trailer_url: Option<String>,
    pub episodes: Vec<EpisodeServer>,
}

impl MovieDetail {
    /// A detail record is only usable when it has both a slug and a title.
    pub fn validate(&self) -> Result<()> {
        if self.summary.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".into()));
        }
        if self.summary.slug.trim().is_empty() {
            return Err(Error::Validation("Slug is required".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TMDB-sourced metadata
// ---------------------------------------------------------------------------

/// Identifiers shared by the images, peoples and keywords payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogRef {
    #[schema(value_type = Object)]
    pub tmdb_id: Option<serde_json::Value>,
    pub tmdb_type: Option<String>,
    pub ophim_id: Option<String>,
    pub slug: Option<String>,
    pub imdb_id: Option<String>,
}

/// Size variants for a single TMDB image. Slots that do not apply to the
/// image's type are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageUrls {
    pub original: String,
    pub w1280: Option<String>,
    pub w780: String,
    pub w342: Option<String>,
    pub w300: Option<String>,
    pub w185: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieImage {
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub aspect_ratio: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub file_path: String,
    pub urls: ImageUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieImages {
    #[serde(flatten)]
    pub reference: CatalogRef,
    #[schema(value_type = Object)]
    pub image_sizes: Option<serde_json::Value>,
    pub images: Vec<MovieImage>,
    pub backdrops: Vec<MovieImage>,
    pub posters: Vec<MovieImage>,
}

/// Profile picture size variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileUrls {
    pub original: String,
    pub h632: String,
    pub w185: String,
    pub w45: String,
}

/// A cast or crew member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub tmdb_people_id: Option<u64>,
    pub adult: Option<bool>,
    pub gender: Option<i64>,
    pub gender_name: Option<String>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub character: Option<String>,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    pub profile_urls: Option<ProfileUrls>,
}

impl Person {
    /// Actors are everyone credited in the "Acting" department.
    pub fn is_cast(&self) -> bool {
        self.known_for_department.as_deref() == Some("Acting")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MoviePeoples {
    #[serde(flatten)]
    pub reference: CatalogRef,
    #[schema(value_type = Object)]
    pub profile_sizes: Option<serde_json::Value>,
    pub peoples: Vec<Person>,
    pub cast: Vec<Person>,
    pub crew: Vec<Person>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Keyword {
    pub tmdb_keyword_id: Option<u64>,
    pub name: Option<String>,
    pub name_vn: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieKeywords {
    #[serde(flatten)]
    pub reference: CatalogRef,
    pub keywords: Vec<Keyword>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(title: &str, slug: &str) -> MovieDetail {
        MovieDetail {
            summary: MovieSummary {
                title: title.into(),
                slug: slug.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn validate_requires_title_and_slug() {
        assert!(detail("Mai", "mai").validate().is_ok());
        assert!(matches!(
            detail("", "mai").validate(),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            detail("Mai", "  ").validate(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn summary_serializes_frontend_names() {
        let movie = MovieSummary {
            id: Some("abc".into()),
            slug: "mai".into(),
            title: "Mai".into(),
            kind: Some("single".into()),
            episode_current: Some("Full".into()),
            poster_path: Some("https://img.ophim.live/uploads/movies/mai.jpg".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["type"], "single");
        assert_eq!(json["episode_current"], "Full");
        assert!(json["posterPath"].is_string());
        assert!(json["originalTitle"].is_null());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn detail_flattens_summary() {
        let mut movie = detail("Mai", "mai");
        movie.trailer_url = Some("https://youtu.be/x".into());
        movie.lang_key = vec!["vs".into()];
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["title"], "Mai");
        assert_eq!(json["trailer_url"], "https://youtu.be/x");
        assert_eq!(json["langKey"][0], "vs");
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn empty_pagination_serializes_as_empty_object() {
        let json = serde_json::to_value(Pagination::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn pagination_accepts_string_numbers() {
        let p: Pagination = serde_json::from_str(
            r#"{"totalItems": "120", "totalItemsPerPage": 24, "currentPage": 2, "pageRanges": 5}"#,
        )
        .unwrap();
        assert_eq!(p.total_items, Some(120));
        assert_eq!(p.current_page, Some(2));
    }

    #[test]
    fn episode_server_tolerates_missing_data() {
        let server: EpisodeServer =
            serde_json::from_str(r#"{"server_name": "Vietsub #1", "server_data": null}"#).unwrap();
        assert_eq!(server.server_name.as_deref(), Some("Vietsub #1"));
        assert!(server.server_data.is_empty());
    }

    #[test]
    fn person_cast_split() {
        let actor = Person {
            known_for_department: Some("Acting".into()),
            ..Default::default()
        };
        let director = Person {
            known_for_department: Some("Directing".into()),
            ..Default::default()
        };
        assert!(actor.is_cast());
        assert!(!director.is_cast());
        assert!(!Person::default().is_cast());
    }
}
