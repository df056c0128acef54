use std::sync::Arc;

use crate::{
    catalog::CatalogStore,
    error::{AppError, AppResult},
    models::{ExternalId, RankedMovie, Recommendation},
    services::posters::PosterFetcher,
};

/// Number of similar titles returned per search
pub const RECOMMENDATION_COUNT: usize = 5;

/// Ranks catalog neighbours of a movie and enriches them with posters
///
/// The catalog is injected so tests can substitute fixtures for the loaded
/// artifacts.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<CatalogStore>,
    posters: PosterFetcher,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<CatalogStore>, posters: PosterFetcher) -> Self {
        Self { catalog, posters }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Most similar movies to `title`, best first
    ///
    /// The query movie is skipped by its resolved position, so a duplicate
    /// title or a tie with the self-similarity score is still ranked normally.
    pub fn recommend(&self, title: &str) -> AppResult<Vec<RankedMovie>> {
        let position = self
            .catalog
            .position_of(title)
            .ok_or_else(|| AppError::MovieNotFound(title.to_string()))?;

        let row = self.catalog.similarity_row(position).ok_or_else(|| {
            AppError::Internal(format!("no similarity row for position {}", position))
        })?;

        let ranked = rank_neighbours(row, position, RECOMMENDATION_COUNT)
            .into_iter()
            .filter_map(|(neighbour, score)| {
                self.catalog.record(neighbour).map(|record| RankedMovie {
                    position: record.position,
                    external_id: record.external_id,
                    title: record.title.clone(),
                    score,
                })
            })
            .collect();

        Ok(ranked)
    }

    /// Recommendations for `title` with poster URLs resolved
    ///
    /// Fails only with `MovieNotFound`; poster failures surface as placeholder
    /// URLs.
    pub async fn get_recommendations(&self, title: &str) -> AppResult<Vec<Recommendation>> {
        let ranked = self.recommend(title)?;

        let movie_ids: Vec<ExternalId> = ranked.iter().map(|movie| movie.external_id).collect();
        let posters = self.posters.fetch_many(&movie_ids).await;

        Ok(ranked
            .into_iter()
            .zip(posters)
            .map(|(movie, poster_url)| Recommendation {
                title: movie.title,
                poster_url,
            })
            .collect())
    }
}

/// Positions of the `limit` highest scores in `row`, excluding `exclude`
///
/// Scores are ordered descending with a stable sort, so equal scores keep
/// catalog order.
fn rank_neighbours(row: &[f64], exclude: usize, limit: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(position, _)| *position != exclude)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}
