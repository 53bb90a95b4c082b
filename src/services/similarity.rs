use crate::error::{AppError, AppResult};

/// Precomputed N×N similarity scores, rows and columns in catalog order
///
/// Stored row-major in a single buffer. Construction rejects ragged rows and
/// non-finite scores so that ranking never has to deal with them.
#[derive(Debug, Clone)]
pub struct SimilarityTable {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityTable {
    pub fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::DataInconsistency(format!(
                    "Similarity table is not square: row {} has {} columns, expected {}",
                    row_index,
                    row.len(),
                    size
                )));
            }
            if let Some(column) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::DataInconsistency(format!(
                    "Similarity table has a non-finite score at ({}, {})",
                    row_index, column
                )));
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of one movie against every catalog entry
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }
}
