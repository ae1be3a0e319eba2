//! Unified error type for phimhub.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

/// Message used whenever the catalog has no movie for a slug.
pub const MOVIE_NOT_FOUND: &str = "Không tìm thấy phim";

/// Unified error type covering all failure modes in phimhub.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested movie (or other catalog entry) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request data failed validation. The message is shown to the client.
    #[error("{0}")]
    Validation(String),

    /// The upstream catalog API failed, returned a non-success status, or
    /// sent a body we could not decode.
    #[error("API Error: {message}")]
    Upstream {
        /// Human-readable error description.
        message: String,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    ///
    /// Every upstream problem surfaces as a 500; only missing movies are 404.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Validation(_) => 400,
            Error::Upstream { .. } => 500,
            Error::Config(_) => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for a missing movie.
    pub fn movie_not_found() -> Self {
        Error::NotFound(MOVIE_NOT_FOUND.to_string())
    }

    /// Convenience constructor for [`Error::Upstream`].
    pub fn upstream(message: impl Into<String>) -> Self {
        Error::Upstream {
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
