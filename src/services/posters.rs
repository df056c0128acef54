//! Bounded parallel poster enrichment.
//!
//! Every id gets exactly one lookup. A lookup that fails, times out or panics
//! is replaced by [`ERROR_PLACEHOLDER`] without affecting its siblings, and a
//! movie without artwork gets [`NO_POSTER_PLACEHOLDER`]. Results are written
//! into the slot of the id's input position, so output order never depends
//! on completion order.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::task::JoinHandle;

use crate::{
    models::ExternalId,
    services::providers::{PosterLookup, PosterProvider},
};

pub const NO_POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/500x750/667eea/ffffff?text=No+Poster+Available";
pub const ERROR_PLACEHOLDER: &str =
    "https://via.placeholder.com/500x750/667eea/ffffff?text=Loading+Error";

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Aborts the wrapped task when dropped, so lookups do not outlive a
/// cancelled `fetch_many`.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Clone)]
pub struct PosterFetcher {
    provider: Arc<dyn PosterProvider>,
    concurrency: usize,
    timeout: Duration,
}

impl PosterFetcher {
    pub fn new(provider: Arc<dyn PosterProvider>) -> Self {
        Self {
            provider,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Maximum lookups in flight at once; clamped to at least one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves every id to a displayable URL, preserving input order
    ///
    /// Dropping the returned future aborts any lookups still in flight.
    pub async fn fetch_many(&self, movie_ids: &[ExternalId]) -> Vec<String> {
        if movie_ids.is_empty() {
            return Vec::new();
        }
        let mut slots: Vec<Option<String>> = vec![None; movie_ids.len()];

        let provider_name = self.provider.name();
        let mut lookups = stream::iter(movie_ids.iter().copied().enumerate())
            .map(|(index, movie_id)| {
                let provider = self.provider.clone();
                let timeout = self.timeout;
                // Spawned so a panicking lookup is contained to its own slot.
                let handle = AbortOnDrop(tokio::spawn(async move {
                    match tokio::time::timeout(timeout, provider.fetch_poster(movie_id)).await {
                        Ok(Ok(PosterLookup::Found(url))) => url,
                        Ok(Ok(PosterLookup::Missing)) => NO_POSTER_PLACEHOLDER.to_string(),
                        Ok(Err(e)) => {
                            tracing::warn!(
                                movie_id = movie_id,
                                error = %e,
                                "Poster fetch failed"
                            );
                            ERROR_PLACEHOLDER.to_string()
                        }
                        Err(_) => {
                            tracing::warn!(
                                movie_id = movie_id,
                                timeout_ms = timeout.as_millis() as u64,
                                "Poster fetch timed out"
                            );
                            ERROR_PLACEHOLDER.to_string()
                        }
                    }
                }));
                async move {
                    let mut handle = handle;
                    (index, (&mut handle.0).await)
                }
            })
            .buffer_unordered(self.concurrency);

        while let Some((index, outcome)) = lookups.next().await {
            let url = match outcome {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!(
                        movie_id = movie_ids[index],
                        error = %e,
                        "Poster task join error"
                    );
                    ERROR_PLACEHOLDER.to_string()
                }
            };
            slots[index] = Some(url);
        }

        let failures = slots
            .iter()
            .filter(|slot| slot.as_deref() == Some(ERROR_PLACEHOLDER))
            .count();
        tracing::debug!(
            requested = movie_ids.len(),
            failures = failures,
            provider = provider_name,
            "Poster batch completed"
        );

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| ERROR_PLACEHOLDER.to_string()))
            .collect()
    }
}
