use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogRecord, Movie},
};

/// Read-only lookup over the movie catalog
///
/// Built once from the persisted catalog listing. Record order defines each
/// movie's `catalog_index`, which must match the similarity table's row order.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    movies: Vec<Movie>,
    /// Lowercased titles, parallel to `movies`
    folded_titles: Vec<String>,
    by_id: HashMap<u64, usize>,
}

impl CatalogStore {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        let mut movies = Vec::with_capacity(records.len());
        let mut folded_titles = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for (catalog_index, record) in records.into_iter().enumerate() {
            if by_id.contains_key(&record.movie_id) {
                tracing::warn!(
                    movie_id = record.movie_id,
                    catalog_index,
                    "Duplicate movie id in catalog, keeping first occurrence"
                );
            } else {
                by_id.insert(record.movie_id, catalog_index);
            }

            folded_titles.push(record.title.to_lowercase());
            movies.push(Movie::new(record.movie_id, record.title, catalog_index));
        }

        Self {
            movies,
            folded_titles,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, catalog_index: usize) -> Option<&Movie> {
        self.movies.get(catalog_index)
    }

    pub fn find_by_id(&self, id: u64) -> AppResult<Movie> {
        self.by_id
            .get(&id)
            .map(|&index| self.movies[index].clone())
            .ok_or_else(|| AppError::NotFound(format!("No movie with id {}", id)))
    }

    /// Case-sensitive exact title match, first in catalog order
    pub fn find_by_title_exact(&self, title: &str) -> AppResult<Movie> {
        self.movies
            .iter()
            .find(|movie| movie.title == title)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No movie titled '{}'", title)))
    }

    /// Case-insensitive substring search. Matches keep catalog order and an
    /// empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<Movie> {
        let needle = query.to_lowercase();

        self.folded_titles
            .iter()
            .zip(&self.movies)
            .filter(|(folded, _)| folded.contains(&needle))
            .map(|(_, movie)| movie.clone())
            .collect()
    }
}
