//! Movie metadata provider abstraction
//!
//! Metadata is purely for display: posters, cast and the rest of the details
//! panel. Ranking never depends on it, and every call is independent, so a
//! provider may be swapped or cached without changing recommendations.
use crate::{error::AppResult, models::MovieDetails};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataEnricher: Send + Sync {
    /// Resolve the full poster image URL for a movie
    ///
    /// A movie without a poster on the provider side is an `Upstream` error.
    async fn fetch_poster(&self, movie_id: u64) -> AppResult<String>;

    /// Fetch display attributes for a movie
    ///
    /// Missing fields in the provider response degrade to their documented
    /// defaults instead of failing the record.
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
