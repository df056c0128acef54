use serde::{Deserialize, Serialize};

/// External identifier used to query TMDB for artwork
pub type ExternalId = u64;

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    /// Index into the catalog and the similarity matrix, assigned at load time
    pub position: usize,
    pub external_id: ExternalId,
    pub title: String,
}

/// Row shape of the exported `movie_list.json` artifact
#[derive(Debug, Clone, Deserialize)]
pub struct MovieListEntry {
    pub movie_id: ExternalId,
    pub title: String,
}

impl MovieRecord {
    pub fn from_entry(position: usize, entry: MovieListEntry) -> Self {
        Self {
            position,
            external_id: entry.movie_id,
            title: entry.title,
        }
    }
}

/// Square matrix of pairwise similarity scores, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from nested rows, rejecting anything that is not square
    /// or that contains non-finite scores.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                ));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(format!("non-finite score at ({}, {})", i, j));
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, position: usize) -> Option<&[f64]> {
        if position >= self.size {
            return None;
        }
        let start = position * self.size;
        Some(&self.scores[start..start + self.size])
    }
}

/// A ranked neighbour of the query movie, before poster enrichment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMovie {
    pub position: usize,
    pub external_id: ExternalId,
    pub title: String,
    pub score: f64,
}

/// A recommendation as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub poster_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_square() {
        let matrix =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.row(1), Some(&[0.5, 1.0][..]));
        assert_eq!(matrix.row(2), None);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert_eq!(result.unwrap_err(), "row 1 has 1 columns, expected 2");
    }

    #[test]
    fn test_from_rows_non_finite() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, f64::NAN], vec![0.5, 1.0]]);
        assert_eq!(result.unwrap_err(), "non-finite score at (0, 1)");
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation {
            title: "Avatar".to_string(),
            poster_url: "https://image.tmdb.org/t/p/w500/abc.jpg".to_string(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["title"], "Avatar");
        assert_eq!(json["posterUrl"], "https://image.tmdb.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn test_movie_list_entry_ignores_extra_fields() {
        let json = r#"{"movie_id": 19995, "title": "Avatar", "tags": "action"}"#;
        let entry: MovieListEntry = serde_json::from_str(json).unwrap();
        let record = MovieRecord::from_entry(0, entry);
        assert_eq!(record.external_id, 19995);
        assert_eq!(record.title, "Avatar");
        assert_eq!(record.position, 0);
    }
}
