use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, RankedNeighbor},
    services::{catalog::CatalogStore, similarity::SimilarityTable},
};

/// Number of neighbors returned when the caller does not ask for a count
pub const DEFAULT_RECOMMENDATIONS: usize = 20;

/// Turns rows of the similarity table into top-K neighbor lists
///
/// Holds shared, immutable handles only, so one engine can serve every
/// session concurrently without locking.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    catalog: Arc<CatalogStore>,
    table: Arc<SimilarityTable>,
}

impl RankingEngine {
    /// Pairs a catalog with its similarity table.
    ///
    /// Fails when the table's dimension does not match the catalog size, since
    /// a misaligned table would silently corrupt every ranking.
    pub fn new(catalog: Arc<CatalogStore>, table: Arc<SimilarityTable>) -> AppResult<Self> {
        if table.size() != catalog.len() {
            return Err(AppError::DataInconsistency(format!(
                "Similarity table is {0}x{0} but the catalog has {1} movies",
                table.size(),
                catalog.len()
            )));
        }

        Ok(Self { catalog, table })
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Returns the `k` movies most similar to `movie`, best first.
    ///
    /// Scores are compared descending with ties broken by ascending catalog
    /// index. The query movie itself is never part of the result, and fewer
    /// than `k` entries come back when the catalog is smaller than `k + 1`.
    #[tracing::instrument(skip(self, movie), fields(movie_id = movie.id, title = %movie.title))]
    pub fn recommend(&self, movie: &Movie, k: usize) -> AppResult<Vec<RankedNeighbor>> {
        let row = self.table.row(movie.catalog_index).ok_or_else(|| {
            AppError::DataInconsistency(format!(
                "Catalog index {} of '{}' has no row in the similarity table",
                movie.catalog_index, movie.title
            ))
        })?;

        let mut candidates: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(index, _)| *index != movie.catalog_index)
            .collect();

        if k == 0 {
            return Ok(Vec::new());
        }
        if k < candidates.len() {
            candidates.select_nth_unstable_by(k - 1, by_score_then_index);
            candidates.truncate(k);
        }
        candidates.sort_by(by_score_then_index);

        let neighbors = candidates
            .into_iter()
            .map(|(index, score)| {
                let neighbor = self.catalog.get(index).ok_or_else(|| {
                    AppError::DataInconsistency(format!(
                        "Similarity column {} has no catalog entry",
                        index
                    ))
                })?;
                Ok(RankedNeighbor {
                    movie: neighbor.clone(),
                    score,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!(results = neighbors.len(), "Ranking completed");

        Ok(neighbors)
    }
}

fn by_score_then_index(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    // Scores are finite (checked when the table is built)
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then(a.0.cmp(&b.0))
}
