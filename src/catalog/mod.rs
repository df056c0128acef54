//! Read-only movie catalog and its precomputed similarity matrix.
//!
//! The store is built once at startup and shared behind an `Arc`; nothing
//! mutates it afterwards, so concurrent readers need no locking.

use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, SimilarityMatrix},
};

pub mod loader;

#[derive(Debug)]
pub struct CatalogStore {
    records: Vec<MovieRecord>,
    similarity: SimilarityMatrix,
}

impl CatalogStore {
    /// Loads both exported artifacts from disk
    ///
    /// Either artifact missing, unreadable or inconsistent with the other is
    /// reported as `DataUnavailable`; no partial catalog is ever returned.
    pub fn load(movie_list_path: &Path, similarity_path: &Path) -> AppResult<Self> {
        let records = loader::load_movie_list(movie_list_path)?;
        let similarity = loader::load_similarity(similarity_path)?;

        let store = Self::from_parts(records, similarity)?;

        tracing::info!(
            movies = store.len(),
            movie_list = %movie_list_path.display(),
            similarity = %similarity_path.display(),
            "Catalog loaded"
        );

        Ok(store)
    }

    /// Builds a store from in-memory data
    pub fn from_parts(records: Vec<MovieRecord>, similarity: SimilarityMatrix) -> AppResult<Self> {
        if similarity.size() != records.len() {
            return Err(AppError::DataUnavailable(format!(
                "similarity matrix is {}x{} but catalog has {} movies",
                similarity.size(),
                similarity.size(),
                records.len()
            )));
        }

        if let Some(record) = records
            .iter()
            .enumerate()
            .find(|(i, record)| record.position != *i)
            .map(|(_, record)| record)
        {
            return Err(AppError::DataUnavailable(format!(
                "movie '{}' has position {} out of catalog order",
                record.title, record.position
            )));
        }

        Ok(Self {
            records,
            similarity,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn record(&self, position: usize) -> Option<&MovieRecord> {
        self.records.get(position)
    }

    /// Position of the first movie whose title matches exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.records.iter().position(|record| record.title == title)
    }

    pub fn similarity_row(&self, position: usize) -> Option<&[f64]> {
        self.similarity.row(position)
    }

    /// All titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.title.as_str())
    }

    /// Case-insensitive substring filter over titles, preserving catalog order
    pub fn search_titles(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.titles().collect();
        }

        self.titles()
            .filter(|title| title.to_lowercase().contains(&needle))
            .collect()
    }
}
