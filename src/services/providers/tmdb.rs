/// TMDB poster provider
///
/// API Flow:
/// 1. Details: /3/movie/{id}?api_key=...&language=en-US → returns `poster_path`
/// 2. Image: {image base}/{poster_path}
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{ExternalId, TmdbMovieDetails},
    services::providers::{PosterLookup, PosterProvider},
};

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbProvider {
    /// Creates a provider whose HTTP client enforces `timeout` on every request
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Joins the CDN base and a TMDB poster path with exactly one slash
    fn image_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url,
            poster_path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn fetch_poster(&self, movie_id: ExternalId) -> AppResult<PosterLookup> {
        let url = format!("{}/{}", self.api_url, movie_id);

        // The API key travels in the query string, so transport errors must
        // not carry the request URL into logs.
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            return Err(AppError::PosterFetchFailed(format!(
                "TMDB returned status {} for movie {}",
                response.status(),
                movie_id
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;
        let details: TmdbMovieDetails = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::PosterFetchFailed(format!("Failed to parse TMDB response: {}", e))
        })?;

        let lookup = match details.poster_path() {
            Some(path) => PosterLookup::Found(self.image_url(path)),
            None => PosterLookup::Missing,
        };

        tracing::debug!(
            movie_id = movie_id,
            tmdb_id = ?details.id,
            title = details.title.as_deref().unwrap_or("unknown"),
            found = matches!(lookup, PosterLookup::Found(_)),
            provider = "tmdb",
            "Poster fetched"
        );

        Ok(lookup)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
