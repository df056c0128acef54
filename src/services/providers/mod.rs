/// Poster artwork provider abstraction
///
/// A provider resolves one external movie id to a poster image URL. It reports
/// failures as errors and leaves placeholder substitution to
/// [`PosterFetcher`](crate::services::posters::PosterFetcher).
use crate::{error::AppResult, models::ExternalId};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Result of a successful poster lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterLookup {
    /// Absolute image URL
    Found(String),
    /// The provider knows the movie but has no poster for it
    Missing,
}

/// Trait for poster artwork providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolve a single movie's poster
    ///
    /// Network failures, non-success statuses and undecodable bodies are
    /// returned as errors.
    async fn fetch_poster(&self, movie_id: ExternalId) -> AppResult<PosterLookup>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
