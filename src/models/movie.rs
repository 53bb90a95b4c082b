use serde::{Deserialize, Serialize};

/// A catalog row as persisted on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRecord {
    /// TMDB identifier
    pub movie_id: u64,
    pub title: String,
}

/// A movie known to the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Movie {
    /// TMDB identifier, used for metadata lookups
    pub id: u64,
    /// Display title
    pub title: String,
    /// Row/column of this movie in the similarity table.
    /// Assigned from catalog order at load time and never changed.
    pub catalog_index: usize,
}

impl Movie {
    /// Creates a movie at the given catalog position
    pub fn new(id: u64, title: impl Into<String>, catalog_index: usize) -> Self {
        Self {
            id,
            title: title.into(),
            catalog_index,
        }
    }
}

/// One entry of a top-K ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedNeighbor {
    pub movie: Movie,
    pub score: f32,
}
