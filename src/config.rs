use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB movie details endpoint; the movie id is appended as a path segment
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL of the TMDB image CDN
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Exported catalog artifact
    #[serde(default = "default_movie_list_path")]
    pub movie_list_path: PathBuf,

    /// Exported similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Timeout for a single poster lookup, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Maximum poster lookups in flight at once
    #[serde(default = "default_poster_concurrency")]
    pub poster_concurrency: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3/movie".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_movie_list_path() -> PathBuf {
    PathBuf::from("movie_list.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("similarity.json")
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_concurrency() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.poster_concurrency == 0 {
            anyhow::bail!("POSTER_CONCURRENCY must be at least 1");
        }
        if self.poster_timeout_secs == 0 {
            anyhow::bail!("POSTER_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
