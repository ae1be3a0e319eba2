//! Catalog access for phimhub.
//!
//! [`OphimClient`] talks to the OPhim HTTP API and returns loosely typed wire
//! envelopes from [`upstream`]. [`CatalogService`] sits on top of any
//! [`CatalogSource`] and reshapes those envelopes into the DTOs exposed by the
//! HTTP API.

pub mod ophim;
pub mod service;
pub mod source;
pub mod transform;
pub mod upstream;

pub use ophim::OphimClient;
pub use service::CatalogService;
pub use source::{CatalogSource, ListFilters};
