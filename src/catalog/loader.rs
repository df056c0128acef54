use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{MovieListEntry, MovieRecord, SimilarityMatrix},
};

/// Reads the exported movie list, assigning positions in file order
pub fn load_movie_list(path: &Path) -> AppResult<Vec<MovieRecord>> {
    let entries: Vec<MovieListEntry> = read_json(path)?;

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| MovieRecord::from_entry(position, entry))
        .collect())
}

/// Reads the exported similarity matrix
pub fn load_similarity(path: &Path) -> AppResult<SimilarityMatrix> {
    let rows: Vec<Vec<f64>> = read_json(path)?;

    SimilarityMatrix::from_rows(rows)
        .map_err(|e| AppError::DataUnavailable(format!("{}: {}", path.display(), e)))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::DataUnavailable(format!("failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::DataUnavailable(format!("failed to parse {}: {}", path.display(), e))
    })
}
