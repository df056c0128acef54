use serde::Deserialize;

pub mod movie;

pub use movie::{
    ExternalId, MovieListEntry, MovieRecord, RankedMovie, Recommendation, SimilarityMatrix,
};

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `/movie/{id}` response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub id: Option<ExternalId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbMovieDetails {
    /// Poster path, treating an empty string the same as an absent field
    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}
