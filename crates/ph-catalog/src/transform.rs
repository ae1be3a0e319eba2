//! Mapping from OPhim wire types to the frontend DTOs.

use ph_core::{
    CatalogRef, ImageUrls, Keyword, MovieDetail, MovieImage, MovieSummary, Person, ProfileUrls,
};

use crate::upstream::{RawImage, RawKeyword, RawMovie, RawPerson, RawRef};

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// Map a listing entry. Image paths are left relative; see [`apply_image_urls`].
pub fn transform_movie(raw: RawMovie) -> MovieSummary {
    let rating = raw
        .tmdb
        .as_ref()
        .and_then(|t| t.vote_average)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    MovieSummary {
        id: raw.id,
        slug: raw.slug.unwrap_or_default(),
        title: raw.name.unwrap_or_default(),
        original_title: raw.origin_name,
        alternative_names: raw.alternative_names,
        description: raw.content.or(raw.description).unwrap_or_default(),
        rating,
        year: raw.year,
        poster_path: raw.poster_url,
        thumb_url: raw.thumb_url,
        kind: raw.kind,
        category: raw.category,
        country: raw.country,
        quality: raw.quality,
        lang: raw.lang,
        episode_current: raw.episode_current,
        episode_total: raw.episode_total,
    }
}

/// Map a detail record. Episodes are attached separately by the caller
/// because they may live outside the movie object.
pub fn transform_movie_detail(mut raw: RawMovie) -> MovieDetail {
    let rating_count = raw.tmdb.as_ref().and_then(|t| t.vote_count).unwrap_or(0);
    let imdb = raw.imdb.take().filter(|v| !v.is_null());
    let status = raw.status.take();
    let lang_key = std::mem::take(&mut raw.lang_key);
    let time = raw.time.take();
    let view = raw.view.take().unwrap_or(0);
    let actor = std::mem::take(&mut raw.actor);
    let director = std::mem::take(&mut raw.director);
    let trailer_url = raw.trailer_url.take();
    let episodes = std::mem::take(&mut raw.episodes);

    MovieDetail {
        summary: transform_movie(raw),
        rating_count,
        imdb,
        status,
        lang_key,
        time,
        view,
        actor,
        director,
        trailer_url,
        episodes,
    }
}

/// Absolute URL for an OPhim image path.
///
/// Empty paths yield `None`; anything already starting with `http` is kept
/// as-is; everything else is placed under `{cdn}/uploads/movies/`.
pub fn build_image_url(path: Option<&str>, cdn: &str) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/uploads/movies/{}",
        cdn.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// Rewrite `posterPath` and `thumbUrl` into absolute URLs.
pub fn apply_image_urls(movie: &mut MovieSummary, cdn: &str) {
    movie.poster_path = build_image_url(movie.poster_path.as_deref(), cdn);
    movie.thumb_url = build_image_url(movie.thumb_url.as_deref(), cdn);
}

// ---------------------------------------------------------------------------
// TMDB-sourced metadata
// ---------------------------------------------------------------------------

pub fn transform_ref(raw: RawRef) -> CatalogRef {
    CatalogRef {
        tmdb_id: raw.tmdb_id.filter(|v| !v.is_null()),
        tmdb_type: raw.tmdb_type,
        ophim_id: raw.ophim_id,
        slug: raw.slug,
        imdb_id: raw.imdb_id,
    }
}

/// Map one TMDB image. Images without a `file_path` cannot be addressed
/// and yield `None`.
pub fn transform_image(raw: RawImage, tmdb_base: &str) -> Option<MovieImage> {
    let file_path = raw.file_path.filter(|p| !p.trim().is_empty())?;
    let base = tmdb_base.trim_end_matches('/');
    let sized = |size: &str| format!("{base}/{size}{file_path}");

    let is_backdrop = raw.kind.as_deref() == Some("backdrop");
    let is_poster = raw.kind.as_deref() == Some("poster");

    let urls = ImageUrls {
        original: sized("original"),
        w1280: is_backdrop.then(|| sized("w1280")),
        w780: sized("w780"),
        w342: is_poster.then(|| sized("w342")),
        w300: is_backdrop.then(|| sized("w300")),
        w185: is_poster.then(|| sized("w185")),
    };

    Some(MovieImage {
        width: raw.width,
        height: raw.height,
        aspect_ratio: raw.aspect_ratio,
        kind: raw.kind,
        file_path,
        urls,
    })
}

pub fn transform_person(raw: RawPerson, tmdb_base: &str) -> Person {
    let base = tmdb_base.trim_end_matches('/');
    let profile_urls = raw
        .profile_path
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|path| ProfileUrls {
            original: format!("{base}/original{path}"),
            h632: format!("{base}/h632{path}"),
            w185: format!("{base}/w185{path}"),
            w45: format!("{base}/w45{path}"),
        });

    Person {
        tmdb_people_id: raw.tmdb_people_id,
        adult: raw.adult,
        gender: raw.gender,
        gender_name: raw.gender_name,
        name: raw.name,
        original_name: raw.original_name,
        character: raw.character,
        known_for_department: raw.known_for_department,
        profile_path: raw.profile_path,
        profile_urls,
    }
}

pub fn transform_keyword(raw: RawKeyword) -> Keyword {
    Keyword {
        tmdb_keyword_id: raw.tmdb_keyword_id,
        name: raw.name,
        name_vn: raw.name_vn,
    }
}
